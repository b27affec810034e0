use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Latest computed hardware metrics. Replaced as a whole on every sampling cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Unix timestamp of the cycle that produced it, 0 before the first sample
    pub sampled_at: i64,
    /// Smoothed CPU load, 0-100
    pub cpu_usage: f32,
    /// Celsius, `None` when no candidate sensor matched
    pub cpu_temp: Option<f32>,
    /// Smoothed GPU load, 0-100
    pub gpu_usage: f32,
    pub gpu_temp: Option<f32>,
    pub ram_used_gb: f32,
    pub ram_total_gb: f32,
    pub ram_usage_percent: f32,
}

/// RAM usage percentage, 0 for a zero total and clamped to 0-100
pub fn ram_percent(used_gb: f32, total_gb: f32) -> f32 {
    if total_gb > 0.0 {
        (used_gb / total_gb * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Snapshot slot shared between the sampling worker and its readers.
///
/// The lock only guards the swap/copy of the value; sensor queries happen outside it.
#[derive(Debug, Clone, Default)]
pub struct SharedSnapshot {
    inner: Arc<Mutex<SensorSnapshot>>,
}

impl SharedSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: SensorSnapshot) {
        *self.inner.lock() = snapshot;
    }

    pub fn load(&self) -> SensorSnapshot {
        self.inner.lock().clone()
    }
}
