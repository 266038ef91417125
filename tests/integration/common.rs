//! Common utilities for integration tests

use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// An isolated COBBLE_HOME holding config, state and the working directory
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The cobble binary, pointed at this home
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cobble"));
        cmd.env("COBBLE_HOME", self.path()).env_remove("RUST_LOG");
        cmd
    }

    /// Same as [`TestHome::command`], wrapped for `assert_cmd` assertions
    pub fn assert_command(&self) -> assert_cmd::Command {
        assert_cmd::Command::from_std(self.command())
    }

    pub fn write_config(&self, yaml: &str) {
        self.dir.child("config.yaml").write_str(yaml).unwrap();
    }

    pub fn write_state(&self, version: &str, release: &str) {
        self.dir
            .child("state.yaml")
            .write_str(&format!(
                "current_version: '{}'\ncurrent_release: {}\n",
                version, release
            ))
            .unwrap();
    }

    pub fn read_state(&self) -> String {
        std::fs::read_to_string(self.path().join("state.yaml")).unwrap_or_default()
    }

    /// Default working directory under COBBLE_HOME
    pub fn work_dir(&self) -> PathBuf {
        self.path().join("Res")
    }
}

/// Release manifest body as published on the release server
pub fn manifest_json(url: &str, release: &str, version: &str) -> String {
    format!(
        r#"{{"Url":"{}","Release":"{}","VersionNumber":"{}","FileName":"PebbleWuff.appx"}}"#,
        url, release, version
    )
}

/// A zip archive containing a single fake package
pub fn package_zip() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("PebbleWuff.appx", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(b"fake appx").unwrap();
    zip.finish().unwrap().into_inner()
}

/// Write a stand-in for WinAppDeployCmd that logs its arguments
///
/// `devices_output` and `list_output` are printed for the matching
/// subcommands; install, update and uninstall print the tool's success
/// message and exit 0.
#[cfg(unix)]
pub fn fake_deploy_tool(dir: &Path, devices_output: &str, list_output: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let log = dir.join("calls.log");
    let script = format!(
        r#"#!/bin/sh
echo "$@" >> '{log}'
case "$1" in
  devices) printf '%s\n' '{devices}' ;;
  list) printf '%s\n' '{list}' ;;
  install) printf 'Installing app...\nRemote action succeeded.\n' ;;
  update) printf 'Updating app...\nRemote action succeeded.\n' ;;
  uninstall) printf 'Uninstalling app...\nRemote action succeeded.\n' ;;
  *) exit 2 ;;
esac
"#,
        log = log.display(),
        devices = devices_output,
        list = list_output,
    );

    let tool = dir.join("WinAppDeployCmd");
    std::fs::write(&tool, script).unwrap();
    let mut perms = std::fs::metadata(&tool).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&tool, perms).unwrap();
    tool
}

/// Lines the fake deployment tool was invoked with
pub fn tool_calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
