//! Turns a raw sensor bag into the handful of metrics shown on the display.

use super::reading::{GpuVendor, HardwareKind, SensorBag, SensorKind, SensorReading};

const MEMORY_USED_SENSOR: &str = "Memory Used";
const MEMORY_AVAILABLE_SENSOR: &str = "Memory Available";

/// Which sensors win when several could provide the same metric
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionPolicy {
    /// CPU temperature sensor names, highest priority first
    pub cpu_temp_sensors: Vec<String>,
    /// GPU vendors, highest priority first
    pub gpu_priority: Vec<GpuVendor>,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        let sampling = crate::core::config::SamplingConfig::default();
        Self {
            cpu_temp_sensors: sampling.cpu_temp_sensors,
            gpu_priority: sampling.gpu_priority,
        }
    }
}

/// Unsmoothed values from a single query; `None` means the metric was not reported
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetrics {
    pub cpu_load: Option<f32>,
    pub cpu_temp: Option<f32>,
    pub gpu_load: Option<f32>,
    pub gpu_temp: Option<f32>,
    /// (used, total) in GB
    pub memory_gb: Option<(f32, f32)>,
}

pub fn extract_metrics(bag: &SensorBag, policy: &ExtractionPolicy) -> RawMetrics {
    let cpu_id = bag
        .hardware
        .iter()
        .find(|hw| hw.kind == HardwareKind::Cpu)
        .map(|hw| hw.identifier.as_str());

    let gpu_id = policy.gpu_priority.iter().find_map(|vendor| {
        bag.hardware
            .iter()
            .find(|hw| hw.kind == HardwareKind::Gpu(*vendor))
            .map(|hw| hw.identifier.as_str())
    });

    let cpu_sensors: Vec<&SensorReading> = match cpu_id {
        Some(id) => bag.sensors.iter().filter(|s| s.parent == id).collect(),
        None => Vec::new(),
    };

    let core_loads: Vec<f32> = cpu_sensors
        .iter()
        .filter(|s| s.kind == SensorKind::Load && s.name.to_lowercase().contains("cpu core"))
        .map(|s| s.value)
        .collect();

    let cpu_load = if core_loads.is_empty() {
        None
    } else {
        Some(core_loads.iter().sum::<f32>() / core_loads.len() as f32)
    };

    let cpu_temp = policy.cpu_temp_sensors.iter().find_map(|candidate| {
        cpu_sensors
            .iter()
            .find(|s| s.kind == SensorKind::Temperature && &s.name == candidate)
            .map(|s| s.value)
    });

    let gpu_core = |kind: SensorKind| -> Option<f32> {
        let id = gpu_id?;
        bag.sensors
            .iter()
            .find(|s| {
                s.parent == id && s.kind == kind && s.name.to_lowercase().contains("gpu core")
            })
            .map(|s| s.value)
    };

    RawMetrics {
        cpu_load,
        cpu_temp,
        gpu_load: gpu_core(SensorKind::Load),
        gpu_temp: gpu_core(SensorKind::Temperature),
        memory_gb: extract_memory(bag, cpu_id, gpu_id),
    }
}

/// System memory comes from the "Memory Used"/"Memory Available" data sensors.
/// Sensors owned by the CPU or the selected GPU never count (GPUs report their own VRAM).
fn extract_memory(bag: &SensorBag, cpu_id: Option<&str>, gpu_id: Option<&str>) -> Option<(f32, f32)> {
    let system_data = |name: &str| {
        bag.sensors
            .iter()
            .find(|s| {
                s.kind == SensorKind::Data
                    && s.name == name
                    && Some(s.parent.as_str()) != cpu_id
                    && Some(s.parent.as_str()) != gpu_id
            })
            .map(|s| s.value)
    };

    let used = system_data(MEMORY_USED_SENSOR)?;
    let available = system_data(MEMORY_AVAILABLE_SENSOR)?;
    Some((used, used + available))
}
