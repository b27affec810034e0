use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::sampling::GpuVendor;

/// Where SteelSeries GG publishes the address of its local GameSense server
#[cfg(windows)]
const CORE_PROPS_PATH: &str = "C:/ProgramData/SteelSeries/GG/coreProps.json";
#[cfg(target_os = "macos")]
const CORE_PROPS_PATH: &str = "/Library/Application Support/SteelSeries GG/coreProps.json";
#[cfg(not(any(windows, target_os = "macos")))]
const CORE_PROPS_PATH: &str = "/etc/steelseries-gg/coreProps.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gamesense: GameSenseConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Connection and registration settings for the GameSense server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameSenseConfig {
    /// Explicit `host:port`; when unset the address is discovered from coreProps.json
    pub address: Option<String>,
    pub app_id: String,
    pub display_name: String,
    pub event_id: String,
    pub setup_timeout_ms: u64,
    pub frame_timeout_ms: u64,
    pub unbind_timeout_ms: u64,
}

impl Default for GameSenseConfig {
    fn default() -> Self {
        Self {
            address: None,
            app_id: "ARCTIS_MONITOR".to_string(),
            display_name: "Arctis Monitor".to_string(),
            event_id: "DISPLAY".to_string(),
            setup_timeout_ms: 3000,
            frame_timeout_ms: 500,
            unbind_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    pub interval_ms: u64,
    pub window_capacity: usize,
    pub stop_timeout_ms: u64,
    /// CPU temperature sensor names, highest priority first
    pub cpu_temp_sensors: Vec<String>,
    /// GPU vendors, highest priority first
    pub gpu_priority: Vec<GpuVendor>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            window_capacity: 5,
            stop_timeout_ms: 3000,
            cpu_temp_sensors: vec![
                "CCD1 (Tdie)".to_string(),
                "Core (Tctl/Tdie)".to_string(),
                "CPU Package".to_string(),
            ],
            gpu_priority: vec![GpuVendor::Nvidia, GpuVendor::Amd, GpuVendor::Intel],
        }
    }
}

impl SamplingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub tick_ms: u64,
    pub hardware_interval_ms: u64,
    pub disk_interval_ms: u64,
    /// How long the device shows each frame before yielding to other apps
    pub frame_duration_ms: u64,
    pub activation_hold_ms: u64,
    /// Mount point queried in disk mode
    pub disk_volume: String,
    /// Label rendered on the first disk line
    pub disk_label: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let (disk_volume, disk_label) = if cfg!(windows) {
            ("C:\\", "C:")
        } else {
            ("/", "/")
        };

        Self {
            tick_ms: 1000,
            hardware_interval_ms: 2000,
            disk_interval_ms: 5000,
            frame_duration_ms: 800,
            activation_hold_ms: 1500,
            disk_volume: disk_volume.to_string(),
            disk_label: disk_label.to_string(),
        }
    }
}

impl ScheduleConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn hardware_interval(&self) -> Duration {
        Duration::from_millis(self.hardware_interval_ms)
    }

    pub fn disk_interval(&self) -> Duration {
        Duration::from_millis(self.disk_interval_ms)
    }

    pub fn activation_hold(&self) -> Duration {
        Duration::from_millis(self.activation_hold_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub enabled: bool,
    pub hold_duration_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hold_duration_ms: 3000,
        }
    }
}

impl InputConfig {
    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms)
    }
}

/// Subset of coreProps.json we care about
#[derive(Debug, Deserialize)]
struct CoreProps {
    address: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path, falling back to defaults when the file is missing or
    /// unreadable (older or hand-edited files should never block startup)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed config {:?}: {}", path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("arctis-monitor").join("config.json"))
    }

    /// Resolve the GameSense base URL: explicit override first, then coreProps.json
    pub fn resolve_base_url(&self, override_address: Option<&str>) -> Result<String> {
        if let Some(address) = override_address.or(self.gamesense.address.as_deref()) {
            return Ok(normalize_base_url(address));
        }

        discover_base_url(Path::new(CORE_PROPS_PATH))
    }
}

/// Read the GameSense address from a coreProps.json file
pub fn discover_base_url(core_props: &Path) -> Result<String> {
    let data = fs::read_to_string(core_props).with_context(|| {
        format!(
            "SteelSeries GG not found (could not read {:?}); is GG running?",
            core_props
        )
    })?;

    let props: CoreProps = serde_json::from_str(&data)
        .with_context(|| format!("Malformed GameSense properties in {:?}", core_props))?;

    Ok(normalize_base_url(&props.address))
}

fn normalize_base_url(address: &str) -> String {
    let trimmed = address.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
