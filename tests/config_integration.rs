//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use undertow::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("UT_DEBUG__LOG_LEVEL", "trace");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.debug.log_level, "trace");
    std::env::remove_var("UT_DEBUG__LOG_LEVEL");
}

#[test]
#[serial]
fn test_numeric_env_override() {
    std::env::set_var("UT_SIMULATION__FIXED_DT", "0.01");
    let config = AppConfig::load().unwrap();
    assert!((config.simulation.fixed_dt - 0.01).abs() < 1e-6);
    std::env::remove_var("UT_SIMULATION__FIXED_DT");
}

#[test]
#[serial]
fn test_default_file_loading() {
    // Remove env vars so the file values show through
    std::env::remove_var("UT_DEBUG__LOG_LEVEL");
    std::env::remove_var("UT_SIMULATION__FIXED_DT");

    let config = AppConfig::load().unwrap();
    // Values from config/default.toml
    assert_eq!(config.simulation.fixed_dt, 0.02);
    assert_eq!(config.zones.len(), 2);
    assert_eq!(config.zones[1].shield_duration, Some(4.0));
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let config = AppConfig::load_from("no_such_directory").unwrap();
    assert_eq!(config.simulation.fixed_dt, AppConfig::default().simulation.fixed_dt);
    assert!(config.zones.is_empty());
}
