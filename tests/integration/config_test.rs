use arctis_monitor::core::config::{discover_base_url, Config};
use arctis_monitor::core::sampling::GpuVendor;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.gamesense.app_id, "ARCTIS_MONITOR");
    assert_eq!(config.gamesense.event_id, "DISPLAY");
    assert!(config.gamesense.address.is_none());
    assert_eq!(config.schedule.hardware_interval_ms, 2000);
    assert_eq!(config.schedule.disk_interval_ms, 5000);
    assert_eq!(config.schedule.frame_duration_ms, 800);
    assert_eq!(config.input.hold_duration_ms, 3000);
    assert_eq!(
        config.sampling.gpu_priority,
        vec![GpuVendor::Nvidia, GpuVendor::Amd, GpuVendor::Intel]
    );
}

#[test]
fn test_config_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.gamesense.address = Some("127.0.0.1:49152".to_string());
    config.schedule.disk_volume = "D:\\".to_string();
    config.schedule.disk_label = "D:".to_string();
    config.input.enabled = false;
    config.sampling.gpu_priority = vec![GpuVendor::Amd];

    config.save_to(&path).unwrap();
    assert!(path.exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_malformed_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_empty_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "   \n").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_discover_base_url_from_core_props() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("coreProps.json");
    fs::write(
        &path,
        r#"{"address": "127.0.0.1:51248", "encryptedAddress": "127.0.0.1:51249"}"#,
    )
    .unwrap();

    assert_eq!(discover_base_url(&path).unwrap(), "http://127.0.0.1:51248");
}

#[test]
fn test_discover_base_url_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("coreProps.json");

    let err = discover_base_url(&path).unwrap_err();
    assert!(err.to_string().contains("SteelSeries GG not found"));
}

#[test]
fn test_discover_base_url_without_address_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("coreProps.json");
    fs::write(&path, r#"{"ggEncryptedAddress": "127.0.0.1:6327"}"#).unwrap();

    assert!(discover_base_url(&path).is_err());
}
