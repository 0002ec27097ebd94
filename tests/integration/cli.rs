//! The `ambattur` binary run headless, with a private HOME.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const FLOW_TOML: &str = r#"
phases = ["Prepare"]

[[teams]]
id = "marker"
name = "Marker Team"
phase = "Prepare"

[[teams.tasks]]
id = "plan"
title = "Plan marker"
"#;

/// A HOME directory whose `~/.ambattur/config.toml` holds `config`.
fn home_with_config(config: &str) -> TempDir {
    let home = TempDir::new().expect("Failed to create temp home");
    let app_dir = home.path().join(".ambattur");
    std::fs::create_dir_all(&app_dir).expect("Failed to create app dir");
    std::fs::write(app_dir.join("config.toml"), config).expect("Failed to write config");
    home
}

fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ambattur"))
        .args(args)
        .env("HOME", home)
        .env_remove("AMBATTUR_DEBUG")
        .output()
        .expect("Failed to run ambattur")
}

/// Test: `check` validates the given file without reading the config
///
/// Given: A config file that does not parse
/// When: `ambattur check` runs on a valid dataset
/// Then: It succeeds and reports the dataset
#[test]
fn test_check_ignores_broken_config() {
    let home = home_with_config("zoom = \"big\"\n");
    let flow = home.path().join("flow.toml");
    std::fs::write(&flow, FLOW_TOML).unwrap();

    let output = run(home.path(), &["check", flow.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok (1 phases, 1 teams, 1 tasks)"));
}

/// Test: Commands that use the config still report a broken one
///
/// Given: A config file that does not parse
/// When: `ambattur list` runs
/// Then: It exits with a failure status
#[test]
fn test_list_reports_broken_config() {
    let home = home_with_config("zoom = \"big\"\n");

    let output = run(home.path(), &["list"]);

    assert!(!output.status.success());
}

/// Test: `list` reads its dataset from the configured file
///
/// Given: A config pointing `data` at a dataset file
/// When: `ambattur list` runs
/// Then: The teams of that dataset are printed
#[test]
fn test_list_uses_configured_dataset() {
    let home = home_with_config("data = \"~/flow.toml\"\n");
    std::fs::write(home.path().join("flow.toml"), FLOW_TOML).unwrap();

    let output = run(home.path(), &["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Marker Team"));
    assert!(stdout.contains("Prepare"));
}
