//! LibreHardwareMonitor sensor reader.
//!
//! LibreHardwareMonitor publishes its sensor tree through WMI under
//! `root\LibreHardwareMonitor` while it is running. Each read opens a fresh connection on the
//! calling thread, so a restarted LibreHardwareMonitor is picked up on the next cycle.

use serde::Deserialize;

use crate::core::sampling::{
    HardwareComponent, HardwareKind, SensorBag, SensorKind, SensorReader, SensorReading,
};
use crate::error::{MonitorError, Result};

#[cfg(windows)]
use wmi::WMIConnection;

pub const LHM_NAMESPACE: &str = "root\\LibreHardwareMonitor";

#[cfg_attr(not(windows), allow(dead_code))]
const SENSOR_QUERY: &str = "SELECT * FROM Sensor WHERE SensorType='Temperature' \
     OR SensorType='Load' OR SensorType='Data'";

#[cfg_attr(not(windows), allow(dead_code))]
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct LhmHardware {
    identifier: String,
    hardware_type: String,
}

#[cfg_attr(not(windows), allow(dead_code))]
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct LhmSensor {
    identifier: String,
    name: String,
    sensor_type: String,
    parent: String,
    value: Option<f32>,
}

impl From<LhmHardware> for HardwareComponent {
    fn from(hw: LhmHardware) -> Self {
        HardwareComponent {
            kind: HardwareKind::from_type_name(&hw.hardware_type),
            identifier: hw.identifier,
        }
    }
}

#[cfg_attr(not(windows), allow(dead_code))]
impl LhmSensor {
    /// Sensors without a current value are skipped
    fn into_reading(self) -> Option<SensorReading> {
        Some(SensorReading {
            kind: SensorKind::from_type_name(&self.sensor_type),
            value: self.value?,
            identifier: self.identifier,
            parent: self.parent,
            name: self.name,
        })
    }
}

#[derive(Debug, Default)]
pub struct LhmSensorReader;

impl LhmSensorReader {
    pub fn new() -> Self {
        Self
    }
}

impl SensorReader for LhmSensorReader {
    #[cfg(windows)]
    fn read(&mut self) -> Result<SensorBag> {
        let wmi_con = WMIConnection::with_namespace_path(LHM_NAMESPACE).map_err(|e| {
            MonitorError::sensor_unavailable(format!(
                "Failed to connect to LibreHardwareMonitor WMI namespace: {}",
                e
            ))
        })?;

        let hardware: Vec<LhmHardware> = wmi_con
            .raw_query("SELECT * FROM Hardware")
            .map_err(|e| MonitorError::sensor_unavailable(format!("Hardware query failed: {}", e)))?;

        let sensors: Vec<LhmSensor> = wmi_con
            .raw_query(SENSOR_QUERY)
            .map_err(|e| MonitorError::sensor_unavailable(format!("Sensor query failed: {}", e)))?;

        Ok(SensorBag {
            hardware: hardware.into_iter().map(HardwareComponent::from).collect(),
            sensors: sensors.into_iter().filter_map(LhmSensor::into_reading).collect(),
        })
    }

    #[cfg(not(windows))]
    fn read(&mut self) -> Result<SensorBag> {
        Err(MonitorError::sensor_unavailable(
            "LibreHardwareMonitor sensors are only available on Windows",
        ))
    }
}
