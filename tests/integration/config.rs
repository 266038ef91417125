//! Tests for `cobble config` commands

use super::common::TestHome;
use predicates::prelude::*;

#[test]
fn test_config_show_creates_default() {
    let home = TestHome::new();

    home.assert_command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest_url:"))
        .stdout(predicate::str::contains(
            "https://raw.githubusercontent.com/bitrvmpd/Pebble-W10M/master/version.js",
        ))
        .stdout(predicate::str::contains("device_ip: 127.0.0.1"))
        .stdout(predicate::str::contains("success_check: exit-code"));

    assert!(home.path().join("config.yaml").exists());
}

#[test]
fn test_set_manifest_url_persists() {
    let home = TestHome::new();

    home.assert_command()
        .args(["config", "set-manifest-url", "https://example.com/version.js"])
        .assert()
        .success();

    home.assert_command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.com/version.js"));
}

#[test]
fn test_set_manifest_url_rejects_non_http() {
    let home = TestHome::new();

    home.assert_command()
        .args(["config", "set-manifest-url", "ftp://example.com/version.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Configuration error"));
}

#[test]
fn test_set_work_dir_creates_directory() {
    let home = TestHome::new();
    let work_dir = home.path().join("packages");

    home.assert_command()
        .args(["config", "set-work-dir"])
        .arg(&work_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Working directory set to"));

    assert!(work_dir.is_dir());
    let config = std::fs::read_to_string(home.path().join("config.yaml")).unwrap();
    assert!(config.contains("work_dir:"));
}

#[test]
fn test_set_sdk_path_warns_when_tool_missing() {
    let home = TestHome::new();
    let sdk = home.path().join("Windows Kits").join("10");

    home.assert_command()
        .args(["config", "set-sdk-path"])
        .arg(&sdk)
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"))
        .stdout(predicate::str::contains("SDK path set to"));

    let config = std::fs::read_to_string(home.path().join("config.yaml")).unwrap();
    assert!(config.contains("sdk_path:"));
}

#[test]
fn test_invalid_config_reports_help() {
    let home = TestHome::new();
    home.write_config("device_ip: [not, a, string]\n");

    home.assert_command()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Help:"));
}
