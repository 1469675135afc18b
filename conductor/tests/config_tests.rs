//! Integration tests for the configuration context

use conductor::AutomationConfig;
use std::path::PathBuf;

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = AutomationConfig {
        scripts_dir: PathBuf::from("/tmp/scripts"),
        max_search_depth: 4,
        max_search_results: 25,
        launch_settle_ms: 500,
        double_click_interval_ms: 80,
    };
    config.save(&path).unwrap();

    let loaded = AutomationConfig::load(&path).unwrap();
    assert_eq!(loaded.scripts_dir, config.scripts_dir);
    assert_eq!(loaded.max_search_depth, 4);
    assert_eq!(loaded.max_search_results, 25);
    assert_eq!(loaded.launch_settle_ms, 500);
    assert_eq!(loaded.double_click_interval_ms, 80);
}

#[test]
fn partial_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"max_search_depth": 3}"#).unwrap();

    let loaded = AutomationConfig::load(&path).unwrap();
    let defaults = AutomationConfig::default();
    assert_eq!(loaded.max_search_depth, 3);
    assert_eq!(loaded.max_search_results, defaults.max_search_results);
    assert_eq!(loaded.launch_settle_ms, defaults.launch_settle_ms);
}

#[test]
fn invalid_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(AutomationConfig::load(&path).is_err());
}
