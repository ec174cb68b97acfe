use sn_logger::{Logger, LoggingConfig, RotationPolicy};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn config_defaults_match_builder_defaults() {
    let config: LoggingConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LoggingConfig::default());
    assert_eq!(config.level, "info");
    assert!(config.console);
    assert_eq!(config.rotation, RotationPolicy::Daily);
}

#[test]
fn from_config_installs_file_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("configured");
    let config: LoggingConfig = serde_json::from_value(serde_json::json!({
        "level": "debug",
        "console": false,
        "path": log_dir,
        "rotation": "never",
        "max_files": 3
    }))?;

    let logger = Logger::from_config("integration-from-config", &config)?;
    tracing::debug!("configured output");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    assert!(fs::read_dir(&log_dir)?.flatten().next().is_some());
    Ok(())
}
