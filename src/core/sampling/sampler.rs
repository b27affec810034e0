use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;

use super::extract::{extract_metrics, ExtractionPolicy};
use super::reading::{MemoryProbe, SensorReader};
use super::snapshot::{ram_percent, SensorSnapshot, SharedSnapshot};
use super::window::SmoothingWindow;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn bytes_to_gb(bytes: u64) -> f32 {
    (bytes as f64 / BYTES_PER_GB) as f32
}

/// One sampling step: query, extract, smooth, build a snapshot.
///
/// The engine drives this from its worker; tests drive it directly.
pub struct Sampler {
    reader: Box<dyn SensorReader>,
    memory_probe: Box<dyn MemoryProbe>,
    policy: ExtractionPolicy,
    cpu_window: SmoothingWindow,
    gpu_window: SmoothingWindow,
}

impl Sampler {
    pub fn new(
        reader: Box<dyn SensorReader>,
        memory_probe: Box<dyn MemoryProbe>,
        policy: ExtractionPolicy,
        window_capacity: usize,
    ) -> Self {
        Self {
            reader,
            memory_probe,
            policy,
            cpu_window: SmoothingWindow::with_capacity(window_capacity),
            gpu_window: SmoothingWindow::with_capacity(window_capacity),
        }
    }

    /// Build the next snapshot. A failed query leaves the smoothing windows untouched.
    pub fn sample(&mut self) -> Result<SensorSnapshot> {
        let bag = self.reader.read()?;
        let raw = extract_metrics(&bag, &self.policy);

        if let Some(load) = raw.cpu_load {
            self.cpu_window.push(load);
        }
        if let Some(load) = raw.gpu_load {
            self.gpu_window.push(load);
        }

        let (ram_used_gb, ram_total_gb) = match raw.memory_gb {
            Some(memory) => memory,
            None => self
                .memory_probe
                .memory_usage()
                .map(|m| (bytes_to_gb(m.used_bytes), bytes_to_gb(m.total_bytes)))
                .unwrap_or((0.0, 0.0)),
        };

        Ok(SensorSnapshot {
            sampled_at: chrono::Utc::now().timestamp(),
            cpu_usage: self.cpu_window.mean(),
            cpu_temp: raw.cpu_temp,
            gpu_usage: self.gpu_window.mean(),
            gpu_temp: raw.gpu_temp,
            ram_used_gb,
            ram_total_gb,
            ram_usage_percent: ram_percent(ram_used_gb, ram_total_gb),
        })
    }

    /// Sample and publish. Failures are logged and the published snapshot stays as it was.
    /// A snapshot that completes after `stopped` was set is discarded.
    pub fn run_cycle(&mut self, shared: &SharedSnapshot, stopped: &AtomicBool) -> bool {
        match self.sample() {
            Ok(_) if stopped.load(Ordering::SeqCst) => {
                log::debug!("Discarding snapshot sampled after stop");
                false
            }
            Ok(snapshot) => {
                shared.publish(snapshot);
                true
            }
            Err(e) => {
                log::warn!("Sensor read failed, keeping previous snapshot: {}", e);
                false
            }
        }
    }
}
