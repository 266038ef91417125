use super::runner::{CommandOutput, CommandRunner};
use crate::core::{CobbleError, CobbleResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// How a deployment command's success is decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuccessCheck {
    /// Exit status 0 means success
    #[default]
    ExitCode,
    /// stdout must contain the tool's English "<Verb>ing app...\nRemote
    /// action succeeded." message; breaks on localized or reworded output
    OutputMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Install,
    Update,
    Uninstall,
}

impl Action {
    fn progress_line(&self) -> &'static str {
        match self {
            Action::Install => "Installing app...",
            Action::Update => "Updating app...",
            Action::Uninstall => "Uninstalling app...",
        }
    }
}

const REMOTE_SUCCESS: &str = "Remote action succeeded.";

/// Wrapper around WinAppDeployCmd with fixed argument templates
#[derive(Clone)]
pub struct DeployTool {
    program: PathBuf,
    device_ip: String,
    success_check: SuccessCheck,
    runner: Arc<dyn CommandRunner>,
}

impl DeployTool {
    pub fn new(
        program: PathBuf,
        device_ip: impl Into<String>,
        success_check: SuccessCheck,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            program,
            device_ip: device_ip.into(),
            success_check,
            runner,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn device_ip(&self) -> &str {
        &self.device_ip
    }

    fn run(&self, args: &[&str]) -> CobbleResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let output = self.runner.run(&self.program, &args)?;
        debug!(code = ?output.code, stdout = %output.stdout.trim(), "deployment tool finished");
        Ok(output)
    }

    fn file_arg(file: &Path) -> CobbleResult<&str> {
        file.to_str().ok_or_else(|| {
            CobbleError::Path(format!("Package path is not valid UTF-8: {}", file.display()))
        })
    }

    fn succeeded(&self, action: Action, output: &CommandOutput) -> bool {
        match self.success_check {
            SuccessCheck::ExitCode => output.success(),
            SuccessCheck::OutputMatch => {
                let stdout = output.stdout.replace("\r\n", "\n");
                let expected = format!("{}\n{}", action.progress_line(), REMOTE_SUCCESS);
                stdout.contains(&expected)
            }
        }
    }

    /// `devices`: is the configured device among the discovered ones?
    pub fn devices(&self) -> CobbleResult<bool> {
        let output = self.run(&["devices"])?;
        let listed = output.stdout.contains(&self.device_ip);
        if self.success_check == SuccessCheck::ExitCode && !output.success() {
            return Ok(false);
        }
        Ok(listed)
    }

    /// `install -file <path> -ip <addr>`
    pub fn install(&self, file: &Path) -> CobbleResult<bool> {
        let output = self.run(&["install", "-file", Self::file_arg(file)?, "-ip", &self.device_ip])?;
        Ok(self.succeeded(Action::Install, &output))
    }

    /// `update -file <path> -ip <addr>`
    pub fn update(&self, file: &Path) -> CobbleResult<bool> {
        let output = self.run(&["update", "-file", Self::file_arg(file)?, "-ip", &self.device_ip])?;
        Ok(self.succeeded(Action::Update, &output))
    }

    /// `list -ip <addr>`: installed package lines, trimmed, blanks dropped
    pub fn list(&self) -> CobbleResult<Vec<String>> {
        let output = self.run(&["list", "-ip", &self.device_ip])?;
        if self.success_check == SuccessCheck::ExitCode && !output.success() {
            return Err(CobbleError::Deploy(format!(
                "Listing installed apps failed (exit code {:?})",
                output.code
            )));
        }
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// First installed package whose `list` line contains `filter`
    pub fn find_installed(&self, filter: &str) -> CobbleResult<Option<String>> {
        let found = self
            .list()?
            .into_iter()
            .find(|line| line.contains(filter));
        if found.is_none() {
            debug!(filter, "package not installed");
        }
        Ok(found)
    }

    /// `uninstall -package <id> -ip <addr>`
    pub fn uninstall(&self, package_id: &str) -> CobbleResult<bool> {
        if package_id.trim().is_empty() {
            warn!("refusing to uninstall an empty package id");
            return Ok(false);
        }
        let output = self.run(&["uninstall", "-package", package_id, "-ip", &self.device_ip])?;
        Ok(self.succeeded(Action::Uninstall, &output))
    }
}
