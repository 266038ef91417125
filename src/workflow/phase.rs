use super::reporter::{Status, StatusReporter};
use crate::core::{CobbleError, CobbleResult};
use std::fmt;
use std::sync::Arc;

/// Where a single user action currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Checking,
    UpToDate,
    UpdateAvailable,
    Downloading,
    Ready,
    Deploying,
    Installed,
    Updated,
    Uninstalled,
    NotInstalled,
    Failed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::Installed
                | Phase::Updated
                | Phase::Uninstalled
                | Phase::NotInstalled
                | Phase::Failed
        )
    }

    /// Edges of the action state machine
    ///
    /// Idle -> Checking -> {UpToDate | UpdateAvailable} -> Downloading -> Ready
    /// -> Deploying -> {Installed | Updated | Uninstalled | NotInstalled}.
    /// Ready is also reachable directly when a downloaded package is reused,
    /// and any non-terminal phase may fail.
    pub fn can_transition_to(&self, next: Phase) -> bool {
        use Phase::*;

        if next == Failed {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Idle, Checking)
                | (Idle, Ready)
                | (Idle, Deploying)
                | (Checking, UpToDate)
                | (Checking, UpdateAvailable)
                | (Checking, Ready)
                | (UpToDate, Downloading)
                | (UpToDate, Ready)
                | (UpdateAvailable, Downloading)
                | (Downloading, Ready)
                | (Ready, Deploying)
                | (Deploying, Installed)
                | (Deploying, Updated)
                | (Deploying, Uninstalled)
                | (Deploying, NotInstalled)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Checking => "checking",
            Phase::UpToDate => "up-to-date",
            Phase::UpdateAvailable => "update-available",
            Phase::Downloading => "downloading",
            Phase::Ready => "ready",
            Phase::Deploying => "deploying",
            Phase::Installed => "installed",
            Phase::Updated => "updated",
            Phase::Uninstalled => "uninstalled",
            Phase::NotInstalled => "not-installed",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One user action: tracks the phase and reports every change
pub struct Session {
    phase: Phase,
    reporter: Arc<dyn StatusReporter>,
}

impl Session {
    pub fn new(reporter: Arc<dyn StatusReporter>) -> Self {
        Self {
            phase: Phase::Idle,
            reporter,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move to `next` and report `message`; out-of-order steps are rejected
    pub fn transition(&mut self, next: Phase, message: impl Into<String>) -> CobbleResult<()> {
        if !self.phase.can_transition_to(next) {
            return Err(CobbleError::Workflow(format!(
                "Cannot go from {} to {}",
                self.phase, next
            )));
        }
        self.phase = next;
        self.reporter.report(&Status::new(next, message));
        Ok(())
    }

    /// Report progress without changing phase
    pub fn note(&self, message: impl Into<String>) {
        self.reporter.report(&Status::new(self.phase, message));
    }

    /// Move to `Failed` (if not already finished) and report `message`
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.phase.is_terminal() {
            self.phase = Phase::Failed;
        }
        self.reporter.report(&Status::new(Phase::Failed, message));
    }
}
