use crate::core::{CobbleError, CobbleResult};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
}

impl CommandOutput {
    pub fn new(code: Option<i32>, stdout: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an external program to completion and captures its stdout
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &Path, args: &[String]) -> CobbleResult<CommandOutput>;
}

/// Runs programs with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> CobbleResult<CommandOutput> {
        debug!(program = %program.display(), ?args, "running deployment tool");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CobbleError::ToolNotFound(program.display().to_string()),
                _ => CobbleError::Deploy(format!(
                    "Failed to run {}: {}",
                    program.display(),
                    e
                )),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "deployment tool stderr");
        }

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
