//! Tests for the commands that drive the deployment tool
//!
//! A shell script stands in for WinAppDeployCmd, so these only run on Unix.
#![cfg(unix)]

use super::common::{fake_deploy_tool, manifest_json, package_zip, tool_calls, TestHome};
use predicates::prelude::*;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONNECTED: &str = "127.0.0.1   00000015-b21e-0da9-0000-000000000000   Lumia 950";
const NO_DEVICES: &str = "Discovering devices...";
const INSTALLED: &str = "PebbleWuff_1.4.0.0_arm__abcd";

fn configure(home: &TestHome, tool: &Path, manifest_url: &str) {
    home.write_config(&format!(
        "manifest_url: {}\ndeploy_tool: {}\nconnect_delay_ms: 0\n",
        manifest_url,
        tool.display()
    ));
}

fn offline_home(devices: &str, list: &str) -> TestHome {
    let home = TestHome::new();
    let tool = fake_deploy_tool(home.path(), devices, list);
    configure(&home, &tool, "http://127.0.0.1:9/version.js");
    home
}

fn with_package(home: &TestHome) {
    std::fs::create_dir_all(home.work_dir()).unwrap();
    std::fs::write(home.work_dir().join("PebbleWuff.appx"), "appx").unwrap();
}

#[test]
fn test_devices_connected() {
    let home = offline_home(CONNECTED, "");

    home.assert_command()
        .arg("devices")
        .assert()
        .success()
        .stdout(predicate::str::contains("Device connected at 127.0.0.1"));
    assert_eq!(tool_calls(home.path()), vec!["devices"]);
}

#[test]
fn test_devices_not_connected() {
    let home = offline_home(NO_DEVICES, "");

    home.assert_command()
        .arg("devices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Device not connected"))
        .stderr(predicate::str::contains("Help:"));
}

#[test]
fn test_list_prints_packages() {
    let home = offline_home(CONNECTED, INSTALLED);

    home.assert_command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(INSTALLED));
    assert_eq!(tool_calls(home.path()), vec!["list -ip 127.0.0.1"]);
}

#[test]
fn test_missing_tool_is_reported() {
    let home = TestHome::new();
    home.write_config(&format!(
        "deploy_tool: {}\n",
        home.path().join("WinAppDeployCmd.exe").display()
    ));

    home.assert_command()
        .arg("devices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Deployment tool not found"));
}

#[test]
fn test_install_offline_uses_downloaded_package() {
    let home = offline_home(CONNECTED, "");
    with_package(&home);

    home.assert_command()
        .args(["install", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Install Completed!"));

    let calls = tool_calls(home.path());
    assert_eq!(calls[0], "devices");
    assert_eq!(calls[1], "list -ip 127.0.0.1");
    assert!(calls[2].starts_with("install -file "));
    assert!(calls[2].ends_with("PebbleWuff.appx -ip 127.0.0.1"));
}

#[test]
fn test_install_offline_without_package_fails() {
    let home = offline_home(CONNECTED, "");

    home.assert_command()
        .args(["install", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Package error"));
    assert!(tool_calls(home.path()).is_empty());
}

#[test]
fn test_install_updates_existing_package() {
    let home = offline_home(CONNECTED, INSTALLED);
    with_package(&home);

    home.assert_command()
        .args(["install", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Update Completed!"));

    let calls = tool_calls(home.path());
    assert!(calls.last().unwrap().starts_with("update -file "));
}

#[test]
fn test_install_device_not_connected() {
    let home = offline_home(NO_DEVICES, "");
    with_package(&home);

    home.assert_command()
        .args(["install", "--offline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Device not Connected"));
    assert_eq!(tool_calls(home.path()), vec!["devices"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_install_downloads_then_deploys() {
    let server = MockServer::start().await;
    let package_url = format!("{}/PebbleWuff.appx.zip", server.uri());
    Mock::given(method("GET"))
        .and(path("/version.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string(manifest_json(&package_url, "rc", "1.4")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/PebbleWuff.appx.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(package_zip()))
        .expect(1)
        .mount(&server)
        .await;

    let home = TestHome::new();
    let tool = fake_deploy_tool(home.path(), CONNECTED, "");
    configure(&home, &tool, &format!("{}/version.js", server.uri()));

    let mut cmd = home.command();
    cmd.args(["install", "--quiet"]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("New Update Available! v1.4-rc"));
    assert!(stdout.contains("Install Completed! v1.4-rc"));
    assert!(home.read_state().contains("current_release: rc"));
    assert!(tool_calls(home.path()).last().unwrap().starts_with("install -file "));
}

#[test]
fn test_uninstall_installed_package() {
    let home = offline_home(CONNECTED, INSTALLED);

    home.assert_command()
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Uninstall Completed!"));

    assert_eq!(
        tool_calls(home.path()).last().unwrap(),
        &format!("uninstall -package {} -ip 127.0.0.1", INSTALLED)
    );
}

#[test]
fn test_uninstall_not_installed() {
    let home = offline_home(CONNECTED, "Installed packages:");

    home.assert_command()
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("APPX Not Installed!"));
    assert!(!tool_calls(home.path())
        .iter()
        .any(|call| call.starts_with("uninstall")));
}
