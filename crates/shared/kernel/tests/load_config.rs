use serial_test::serial;
use sn_kernel::config::{ConfigError, ToolkitConfig, load_config};
use std::process::Command;
use std::{env, fs};
use tempfile::tempdir;

/// Set only in the child process spawned by `environment_overrides_file_values`.
const CHILD_CONFIG_PATH: &str = "SN_KERNEL_CHILD_CONFIG";

fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("sn.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
#[serial]
fn file_values_fill_sections_and_defaults_cover_the_rest() {
    let dir = tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
        [logging]
        level = "debug"
        rotation = "hourly"

        [mapper]
        pretty = true
        "#,
    );

    let cfg: ToolkitConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.rotation, sn_logger::RotationPolicy::Hourly);
    assert!(cfg.logging.console);
    assert!(cfg.mapper.pretty);
    assert!(!cfg.mapper.include_nulls);
}

#[test]
#[serial]
fn mistyped_value_fails_deserialization() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, "[mapper]\npretty = \"sometimes\"\n");

    let err = load_config::<ToolkitConfig>(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to deserialize config"));
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_config::<ToolkitConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn environment_overlay_in_child() {
    let Ok(path) = env::var(CHILD_CONFIG_PATH) else {
        return;
    };

    let cfg: ToolkitConfig = load_config(Some(&path)).unwrap();
    assert!(cfg.mapper.pretty);
    assert_eq!(cfg.logging.level, "warn");
    assert_eq!(cfg.logging.max_files, 3);
    assert_eq!(cfg.logging.rotation, sn_logger::RotationPolicy::Hourly);
    assert!(!cfg.mapper.include_nulls);
}

#[test]
fn environment_overrides_file_values() {
    let dir = tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
        [logging]
        level = "debug"
        rotation = "hourly"

        [mapper]
        pretty = false
        "#,
    );

    let output = Command::new(env::current_exe().unwrap())
        .args(["--exact", "environment_overlay_in_child", "--test-threads=1"])
        .env(CHILD_CONFIG_PATH, &path)
        .env("SN__MAPPER__PRETTY", "true")
        .env("SN__LOGGING__LEVEL", "warn")
        .env("SN__LOGGING__MAX_FILES", "3")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "child run failed:\n{stdout}");
    assert!(stdout.contains("1 passed"), "child test did not run:\n{stdout}");
}
