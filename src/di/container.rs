//! Service container for dependency injection

use crate::config::Config;
use crate::core::path::state_file;
use crate::core::CobbleResult;
use crate::deploy::{locate_or_prompt, CommandRunner, DeployTool, SystemRunner};
use crate::package::WorkDir;
use crate::state::LocalState;
use crate::update::{HttpReleaseSource, ReleaseSource};
use crate::workflow::{ConsoleReporter, StatusReporter};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration, persisted state and service handles for one action
///
/// Config and state are loaded once up front and passed explicitly; the
/// state is written back only after a successful download.
pub struct ServiceContainer {
    pub config: Config,
    pub state: LocalState,
    pub state_path: PathBuf,
    pub work_dir: WorkDir,
    pub release_source: Arc<dyn ReleaseSource>,
    pub runner: Arc<dyn CommandRunner>,
    pub reporter: Arc<dyn StatusReporter>,
    /// Whether the user can be prompted (stdin is a terminal)
    pub interactive: bool,
}

impl ServiceContainer {
    /// Create a container with production implementations
    ///
    /// # Errors
    ///
    /// Returns an error if the config or state file cannot be read, or the
    /// HTTP client cannot be built.
    pub fn new(show_progress: bool) -> CobbleResult<Self> {
        let config = Config::load()?;
        let state_path = state_file()?;
        let state = LocalState::load_from(&state_path)?;
        let release_source = Arc::new(HttpReleaseSource::new(&config, show_progress)?);

        let mut container = Self::with_providers(
            config,
            state,
            state_path,
            release_source,
            Arc::new(SystemRunner),
            Arc::new(ConsoleReporter),
        )?;
        container.interactive = std::io::stdin().is_terminal();
        Ok(container)
    }

    /// Create a container from explicit parts (used by tests)
    pub fn with_providers(
        config: Config,
        state: LocalState,
        state_path: PathBuf,
        release_source: Arc<dyn ReleaseSource>,
        runner: Arc<dyn CommandRunner>,
        reporter: Arc<dyn StatusReporter>,
    ) -> CobbleResult<Self> {
        let work_dir = WorkDir::new(config.get_work_dir()?);
        Ok(Self {
            config,
            state,
            state_path,
            work_dir,
            release_source,
            runner,
            reporter,
            interactive: false,
        })
    }

    /// Locate the deployment tool (prompting if allowed) and wrap it
    pub fn deploy_tool(&mut self) -> CobbleResult<DeployTool> {
        let program = locate_or_prompt(&mut self.config, self.interactive)?;
        Ok(DeployTool::new(
            program,
            self.config.device_ip.clone(),
            self.config.success_check,
            self.runner.clone(),
        ))
    }
}
