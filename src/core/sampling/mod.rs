//! Hardware sampling.
//!
//! A background worker reads the sensor subsystem at a fixed period, smooths CPU and GPU load
//! over a short moving window and publishes an immutable [`SensorSnapshot`] for the display loop.

mod engine;
mod extract;
mod reading;
mod sampler;
mod snapshot;
mod window;

pub use engine::SamplingEngine;
pub use extract::{extract_metrics, ExtractionPolicy, RawMetrics};
pub use reading::{
    GpuVendor, HardwareComponent, HardwareKind, MemoryProbe, MemoryUsage, SensorBag,
    SensorKind, SensorReader, SensorReading,
};
pub use sampler::{bytes_to_gb, Sampler};
pub use snapshot::{ram_percent, SensorSnapshot, SharedSnapshot};
pub use window::{SmoothingWindow, DEFAULT_WINDOW_CAPACITY};
