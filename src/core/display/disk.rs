use crate::error::Result;

/// Space on one volume, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl DiskUsage {
    pub fn usage_percent(&self) -> f64 {
        if self.total_bytes > 0 {
            self.used_bytes as f64 / self.total_bytes as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Disk-usage query for a fixed volume, called on every disk-mode update
pub trait DiskProbe: Send {
    fn disk_usage(&mut self, volume: &str) -> Result<DiskUsage>;
}
