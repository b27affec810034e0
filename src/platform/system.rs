//! OS-level memory and disk queries through sysinfo.

use std::path::Path;

use sysinfo::{Disks, MemoryRefreshKind, RefreshKind, System};

use crate::core::display::{DiskProbe, DiskUsage};
use crate::core::sampling::{MemoryProbe, MemoryUsage};
use crate::error::{MonitorError, Result};

/// Memory fallback for when LibreHardwareMonitor reports no memory sensors
pub struct SysinfoMemoryProbe {
    system: System,
}

impl SysinfoMemoryProbe {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_memory(MemoryRefreshKind::everything());

        Self {
            system: System::new_with_specifics(refresh_kind),
        }
    }
}

impl Default for SysinfoMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for SysinfoMemoryProbe {
    fn memory_usage(&mut self) -> Option<MemoryUsage> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return None;
        }

        Some(MemoryUsage {
            used_bytes: self.system.used_memory(),
            total_bytes: total,
        })
    }
}

pub struct SysinfoDiskProbe {
    disks: Disks,
}

impl SysinfoDiskProbe {
    pub fn new() -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoDiskProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DiskProbe for SysinfoDiskProbe {
    fn disk_usage(&mut self, volume: &str) -> Result<DiskUsage> {
        self.disks.refresh(true);

        let wanted = Path::new(volume);
        let disk = self
            .disks
            .iter()
            .find(|disk| disk.mount_point() == wanted)
            .ok_or_else(|| MonitorError::other(format!("Volume {} is not mounted", volume)))?;

        let total = disk.total_space();
        let free = disk.available_space();

        Ok(DiskUsage {
            total_bytes: total,
            used_bytes: total.saturating_sub(free),
            free_bytes: free,
        })
    }
}
