use serde::{Deserialize, Serialize};

use crate::error::Result;

/// GPU vendors the sensor subsystem can report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
}

/// Kind of hardware component a sensor hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareKind {
    Cpu,
    Gpu(GpuVendor),
    Memory,
    Other,
}

impl HardwareKind {
    /// Classify a LibreHardwareMonitor `HardwareType` string ("Cpu", "GpuNvidia", ...)
    pub fn from_type_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("gpunvidia") {
            HardwareKind::Gpu(GpuVendor::Nvidia)
        } else if lower.contains("gpuamd") || lower.contains("gpuati") {
            HardwareKind::Gpu(GpuVendor::Amd)
        } else if lower.contains("gpuintel") {
            HardwareKind::Gpu(GpuVendor::Intel)
        } else if lower.contains("cpu") {
            HardwareKind::Cpu
        } else if lower.contains("memory") {
            HardwareKind::Memory
        } else {
            HardwareKind::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Load,
    Temperature,
    Data,
    Other,
}

impl SensorKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Load" => SensorKind::Load,
            "Temperature" => SensorKind::Temperature,
            "Data" => SensorKind::Data,
            _ => SensorKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HardwareComponent {
    pub identifier: String,
    pub kind: HardwareKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub identifier: String,
    pub kind: SensorKind,
    /// Identifier of the owning hardware component
    pub parent: String,
    pub value: f32,
    pub name: String,
}

/// Everything one sensor query returned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorBag {
    pub hardware: Vec<HardwareComponent>,
    pub sensors: Vec<SensorReading>,
}

/// Memory usage in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

/// Queries the hardware sensor subsystem once per call
pub trait SensorReader: Send {
    fn read(&mut self) -> Result<SensorBag>;
}

/// OS-level memory query used when the sensor subsystem reports no memory figures
pub trait MemoryProbe: Send {
    fn memory_usage(&mut self) -> Option<MemoryUsage>;
}
