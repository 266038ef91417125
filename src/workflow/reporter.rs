use super::phase::Phase;
use std::io::{self, Write};
use tracing::{info, warn};

/// A phase change or progress message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub phase: Phase,
    pub message: String,
}

impl Status {
    pub fn new(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
        }
    }
}

/// Receives status updates from a running action
pub trait StatusReporter: Send + Sync {
    fn report(&self, status: &Status);
}

/// Prints status lines to stdout (failures to stderr)
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn report(&self, status: &Status) {
        if status.phase == Phase::Failed {
            warn!(phase = %status.phase, "{}", status.message);
            let _ = writeln!(io::stderr(), "✗ {}", status.message);
        } else {
            info!(phase = %status.phase, "{}", status.message);
            let marker = if status.phase.is_terminal() || status.phase == Phase::UpToDate {
                "✓"
            } else {
                "→"
            };
            let _ = writeln!(io::stdout(), "{} {}", marker, status.message);
        }
    }
}
