// In-memory stand-ins for the sensor, disk and display backends

use arctis_monitor::core::display::{DiskProbe, DiskUsage, DisplaySink, Frame};
use arctis_monitor::core::sampling::{
    GpuVendor, HardwareComponent, HardwareKind, MemoryProbe, MemoryUsage, SensorBag, SensorKind,
    SensorReader, SensorReading,
};
use arctis_monitor::{MonitorError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const GB: u64 = 1024 * 1024 * 1024;

pub fn hw(identifier: &str, kind: HardwareKind) -> HardwareComponent {
    HardwareComponent {
        identifier: identifier.to_string(),
        kind,
    }
}

pub fn sensor(parent: &str, kind: SensorKind, name: &str, value: f32) -> SensorReading {
    SensorReading {
        identifier: format!("{}/{}", parent, name),
        kind,
        parent: parent.to_string(),
        value,
        name: name.to_string(),
    }
}

/// A bag with one CPU (per-core loads) and one NVIDIA GPU
pub fn cpu_gpu_bag(core_loads: &[f32], gpu_load: f32) -> SensorBag {
    let mut sensors: Vec<SensorReading> = core_loads
        .iter()
        .enumerate()
        .map(|(i, load)| {
            sensor(
                "/intelcpu/0",
                SensorKind::Load,
                &format!("CPU Core #{}", i + 1),
                *load,
            )
        })
        .collect();
    sensors.push(sensor("/gpu-nvidia/0", SensorKind::Load, "GPU Core", gpu_load));

    SensorBag {
        hardware: vec![
            hw("/intelcpu/0", HardwareKind::Cpu),
            hw("/gpu-nvidia/0", HardwareKind::Gpu(GpuVendor::Nvidia)),
        ],
        sensors,
    }
}

/// Returns scripted bags in order; `None` entries and an exhausted script are query failures
pub struct ScriptedReader {
    script: VecDeque<Option<SensorBag>>,
}

impl ScriptedReader {
    pub fn new(script: Vec<Option<SensorBag>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl SensorReader for ScriptedReader {
    fn read(&mut self) -> Result<SensorBag> {
        self.script
            .pop_front()
            .flatten()
            .ok_or_else(|| MonitorError::sensor_unavailable("scripted failure"))
    }
}

/// Always returns the same bag
pub struct FixedReader(pub SensorBag);

impl SensorReader for FixedReader {
    fn read(&mut self) -> Result<SensorBag> {
        Ok(self.0.clone())
    }
}

pub struct FixedMemory(pub Option<MemoryUsage>);

impl MemoryProbe for FixedMemory {
    fn memory_usage(&mut self) -> Option<MemoryUsage> {
        self.0
    }
}

/// Disk probe returning a fixed usage, or failing when `None`
pub struct FixedDisk(pub Option<DiskUsage>);

impl DiskProbe for FixedDisk {
    fn disk_usage(&mut self, volume: &str) -> Result<DiskUsage> {
        self.0
            .ok_or_else(|| MonitorError::other(format!("no such volume: {}", volume)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register(String),
    Bind(usize),
    Frame {
        lines: Vec<String>,
        duration_ms: Option<u64>,
    },
    Unbind,
    Unregister(String),
}

/// Records every call; `fail` makes every call return an error after recording it
#[derive(Default)]
pub struct RecordingSink {
    pub calls: Mutex<Vec<Call>>,
    pub fail: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn frames(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Frame { lines, .. } => Some(lines),
                _ => None,
            })
            .collect()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().push(call);
        if self.fail.load(Ordering::SeqCst) {
            Err(MonitorError::display("sink offline"))
        } else {
            Ok(())
        }
    }
}

impl DisplaySink for RecordingSink {
    fn register(&self, app_id: &str, _display_name: &str) -> Result<()> {
        self.record(Call::Register(app_id.to_string()))
    }

    fn bind(&self, _event_id: &str, line_count: usize) -> Result<()> {
        self.record(Call::Bind(line_count))
    }

    fn send_frame(&self, _event_id: &str, frame: &Frame, duration_ms: Option<u64>) -> Result<()> {
        self.record(Call::Frame {
            lines: frame.lines.to_vec(),
            duration_ms,
        })
    }

    fn unbind(&self, _event_id: &str) -> Result<()> {
        self.record(Call::Unbind)
    }

    fn unregister(&self, app_id: &str) -> Result<()> {
        self.record(Call::Unregister(app_id.to_string()))
    }
}
