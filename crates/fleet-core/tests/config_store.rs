use std::time::Duration;

use tempfile::TempDir;

use fleet_core::config::{ConfigStore, FleetConfig};

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_paths(temp.path().join("fleet"));

    let config = store.load().unwrap();

    assert_eq!(config.host, "https://api.fleethost.io/v1/");
    assert_eq!(config.machine_token, None);
    assert_eq!(config.poll_interval(), Duration::from_millis(3_000));
}

#[test]
fn save_then_load_round_trips() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_paths(temp.path().join("fleet"));

    let config = FleetConfig {
        host: "https://api.staging.fleethost.io/v1/".to_string(),
        machine_token: Some("token-123".to_string()),
        poll_interval_ms: 500,
    };
    store.save(&config).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.host, config.host);
    assert_eq!(loaded.machine_token.as_deref(), Some("token-123"));
    assert_eq!(loaded.poll_interval(), Duration::from_millis(500));
}

#[test]
fn partial_file_fills_in_defaults() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("fleet");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("fleet.toml"), "machine_token = \"abc\"\n").unwrap();
    let store = ConfigStore::from_paths(dir);

    let config = store.load().unwrap();

    assert_eq!(config.machine_token.as_deref(), Some("abc"));
    assert_eq!(config.host, "https://api.fleethost.io/v1/");
}

#[test]
fn invalid_toml_is_an_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("fleet");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("fleet.toml"), "host = [not toml").unwrap();
    let store = ConfigStore::from_paths(dir);

    assert!(store.load().is_err());
}
