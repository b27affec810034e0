use crate::core::sampling::{bytes_to_gb, SensorSnapshot};

use super::disk::DiskUsage;

pub const FRAME_LINES: usize = 3;

/// Three text lines rendered on the OLED screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: [String; FRAME_LINES],
}

impl Frame {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>, line3: impl Into<String>) -> Self {
        Self {
            lines: [line1.into(), line2.into(), line3.into()],
        }
    }

    /// CPU and GPU load/temperature plus RAM usage.
    /// Loads and temperatures are truncated to whole numbers; missing temperatures show as 0.
    pub fn hardware(snapshot: &SensorSnapshot) -> Self {
        let cpu_temp = snapshot.cpu_temp.unwrap_or(0.0);
        let gpu_temp = snapshot.gpu_temp.unwrap_or(0.0);

        Self::new(
            format!(
                "CPU ⇾ {:>2}%🌡{:>2}°C",
                snapshot.cpu_usage as i64, cpu_temp as i64
            ),
            format!(
                "GPU ⇾ {:>2}%🌡{:>2}°C",
                snapshot.gpu_usage as i64, gpu_temp as i64
            ),
            format!(
                "RAM ⇾ {:.1}/{:.0}GB",
                snapshot.ram_used_gb, snapshot.ram_total_gb
            ),
        )
    }

    /// Usage percent, used and free space, rounded to the nearest integer
    pub fn disk(label: &str, usage: &DiskUsage) -> Self {
        Self::new(
            format!("DISK {} {}%", label, usage.usage_percent().round() as i64),
            format!("Used: {}GB", bytes_to_gb(usage.used_bytes).round() as i64),
            format!("Free: {}GB", bytes_to_gb(usage.free_bytes).round() as i64),
        )
    }

    /// One-shot confirmation shown when the display is switched back on
    pub fn activation() -> Self {
        Self::new("", "  ✅ MONITOR ON", "")
    }
}
