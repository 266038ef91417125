//! User actions (check, download, install, uninstall) as explicit phase
//! transitions reported through a [`StatusReporter`].

pub mod phase;
pub mod reporter;

pub use phase::{Phase, Session};
pub use reporter::{ConsoleReporter, Status, StatusReporter};

use crate::core::{CobbleError, CobbleResult};
use crate::deploy::DeployTool;
use crate::di::ServiceContainer;
use crate::manifest::ReleaseManifest;
use crate::update::{evaluate, UpdateDecision};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of comparing the local release with the published one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    pub remote: ReleaseManifest,
    pub decision: UpdateDecision,
}

/// How a deployment action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    Installed,
    Updated,
    Uninstalled,
    NotInstalled,
    Failed,
}

/// Which deployment command `install` ends up running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeployAction {
    Install,
    Update,
}

impl DeployAction {
    fn phase(self) -> Phase {
        match self {
            DeployAction::Install => Phase::Installed,
            DeployAction::Update => Phase::Updated,
        }
    }

    fn outcome(self) -> DeployOutcome {
        match self {
            DeployAction::Install => DeployOutcome::Installed,
            DeployAction::Update => DeployOutcome::Updated,
        }
    }
}

impl std::fmt::Display for DeployAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployAction::Install => f.write_str("Install"),
            DeployAction::Update => f.write_str("Update"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Deploy the package already on disk without contacting the release server
    pub skip_check: bool,
}

/// Run a blocking deployment-tool call off the async runtime
async fn blocking<T, F>(f: F) -> CobbleResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> CobbleResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CobbleError::Workflow(format!("Background task failed: {}", e)))?
}

/// Compare the published release with the local one
pub async fn check(services: &ServiceContainer, session: &mut Session) -> CobbleResult<UpdateCheck> {
    session.transition(Phase::Checking, "Checking for new APPX version...")?;

    let result = async {
        let local = services.state.local_release()?;
        let remote = services.release_source.fetch_manifest().await?;
        let exists = services.work_dir.has_artifact(&remote.file_name);
        let decision = evaluate(&local, &remote, exists);
        debug!(?decision, local_file_exists = exists, remote = %remote, "update check");
        Ok::<_, CobbleError>(UpdateCheck { remote, decision })
    }
    .await;

    match result {
        Ok(check) => {
            match check.decision {
                UpdateDecision::UpdateAvailable(reason) => session.transition(
                    Phase::UpdateAvailable,
                    format!("New Update Available! {} ({})", check.remote.tag(), reason),
                )?,
                UpdateDecision::UpToDate => session.transition(
                    Phase::UpToDate,
                    format!("Up to date, Current: {}", services.state.tag()),
                )?,
            }
            Ok(check)
        }
        Err(e) => {
            session.fail(format!("Update check failed: {}", e));
            Err(e)
        }
    }
}

/// Replace the working directory contents with `manifest`'s package
///
/// Recreates the directory, downloads `<FileName>.zip`, extracts it in
/// place and records the new release in the state file. Returns the
/// package file to deploy.
pub async fn download(
    services: &mut ServiceContainer,
    session: &mut Session,
    manifest: &ReleaseManifest,
) -> CobbleResult<PathBuf> {
    session.transition(Phase::Downloading, format!("Downloading {}...", manifest.tag()))?;

    match fetch_and_extract(services, manifest).await {
        Ok(package) => {
            services.state.record(manifest);
            services.state.save_to(&services.state_path)?;
            session.transition(Phase::Ready, format!("Download Complete! {}", manifest.tag()))?;
            Ok(package)
        }
        Err(e) => {
            session.fail(format!("Download Failed! {}: {}", manifest.tag(), e));
            Err(e)
        }
    }
}

async fn fetch_and_extract(
    services: &ServiceContainer,
    manifest: &ReleaseManifest,
) -> CobbleResult<PathBuf> {
    let work_dir = services.work_dir.clone();
    work_dir.recreate()?;

    let archive = work_dir.archive_path(&manifest.file_name);
    services
        .release_source
        .download(&manifest.download_url, &archive)
        .await?;

    if !archive.is_file() {
        return Err(CobbleError::Archive(format!(
            "Downloaded archive {} is missing",
            archive.display()
        )));
    }

    blocking(move || {
        work_dir.extract(&archive)?;
        work_dir.locate_package()
    })
    .await
}

/// Make sure the newest package is on disk, returning it
///
/// Falls back to an already downloaded package when the release server
/// cannot be reached.
pub async fn prepare_package(
    services: &mut ServiceContainer,
    session: &mut Session,
    options: InstallOptions,
) -> CobbleResult<PathBuf> {
    if options.skip_check {
        let package = services.work_dir.locate_package().inspect_err(|e| {
            session.fail(format!("APPX Not Downloaded! {}", e));
        })?;
        session.transition(Phase::Ready, format!("Using downloaded package {}", services.state.tag()))?;
        return Ok(package);
    }

    session.transition(Phase::Checking, "Checking for new APPX version...")?;
    let local = services.state.local_release();
    let fetched = services.release_source.fetch_manifest().await;

    let (local, remote) = match (local, fetched) {
        (Ok(local), Ok(remote)) => (local, remote),
        (Err(e), _) | (_, Err(e)) => {
            return match services.work_dir.locate_package() {
                Ok(package) => {
                    warn!("update check failed, deploying downloaded package: {}", e);
                    session.transition(
                        Phase::Ready,
                        format!(
                            "Update check failed ({}), using downloaded package {}",
                            e,
                            services.state.tag()
                        ),
                    )?;
                    Ok(package)
                }
                Err(_) => {
                    session.fail(format!("Update check failed: {}", e));
                    Err(e)
                }
            };
        }
    };

    let exists = services.work_dir.has_artifact(&remote.file_name);
    match evaluate(&local, &remote, exists) {
        UpdateDecision::UpdateAvailable(reason) => {
            session.transition(
                Phase::UpdateAvailable,
                format!("New Update Available! {} ({})", remote.tag(), reason),
            )?;
            download(services, session, &remote).await
        }
        UpdateDecision::UpToDate => {
            session.transition(
                Phase::UpToDate,
                format!("Up to date, Current: {}", services.state.tag()),
            )?;
            match services.work_dir.locate_package() {
                Ok(package) => {
                    session.transition(Phase::Ready, format!("Using downloaded package {}", services.state.tag()))?;
                    Ok(package)
                }
                // Recorded as current but the directory was emptied by hand
                Err(_) => download(services, session, &remote).await,
            }
        }
    }
}

/// Wait for the device, reporting progress; fails the session when absent
async fn require_device(
    services: &ServiceContainer,
    session: &mut Session,
    tool: &DeployTool,
) -> CobbleResult<()> {
    let checker = tool.clone();
    let connected = match blocking(move || checker.devices()).await {
        Ok(connected) => connected,
        Err(e) => {
            session.fail(format!("Device check failed: {}", e));
            return Err(e);
        }
    };

    if !connected {
        session.fail("Device not Connected");
        return Err(CobbleError::DeviceNotConnected(tool.device_ip().to_string()));
    }

    session.note("Device Connected!");
    if services.config.connect_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(services.config.connect_delay_ms)).await;
    }
    Ok(())
}

fn deploy_tool_or_fail(services: &mut ServiceContainer, session: &mut Session) -> CobbleResult<DeployTool> {
    services.deploy_tool().inspect_err(|e| {
        session.fail(format!("{}", e));
    })
}

/// Download if needed, then install or update the package on the device
pub async fn install(
    services: &mut ServiceContainer,
    session: &mut Session,
    options: InstallOptions,
) -> CobbleResult<DeployOutcome> {
    let package = prepare_package(services, session, options).await?;
    let tag = services.state.tag();

    let tool = deploy_tool_or_fail(services, session)?;
    session.transition(Phase::Deploying, "Checking device connection...")?;
    require_device(services, session, &tool).await?;

    let filter = services.config.package_filter.clone();
    let checker = tool.clone();
    let installed = match blocking(move || checker.find_installed(&filter)).await {
        Ok(installed) => installed,
        Err(e) => {
            session.fail(format!("Install Failed {}: {}", tag, e));
            return Err(e);
        }
    };

    let (action, result) = match installed {
        Some(id) => {
            session.note(format!("Updating APPX (installed: {})...", id));
            let file = package.clone();
            (DeployAction::Update, blocking(move || tool.update(&file)).await)
        }
        None => {
            session.note("Installing APPX...");
            let file = package.clone();
            (DeployAction::Install, blocking(move || tool.install(&file)).await)
        }
    };

    match result {
        Ok(true) => {
            session.transition(action.phase(), format!("{} Completed! {}", action, tag))?;
            Ok(action.outcome())
        }
        Ok(false) => {
            session.fail(format!("{} Failed {}", action, tag));
            Ok(DeployOutcome::Failed)
        }
        Err(e) => {
            session.fail(format!("{} Failed {}: {}", action, tag, e));
            Err(e)
        }
    }
}

/// Remove the package from the device if it is installed
pub async fn uninstall(services: &mut ServiceContainer, session: &mut Session) -> CobbleResult<DeployOutcome> {
    let tag = services.state.tag();
    let tool = deploy_tool_or_fail(services, session)?;

    session.transition(Phase::Deploying, "Checking device connection...")?;
    require_device(services, session, &tool).await?;

    session.note("Checking if APPX is installed...");
    let filter = services.config.package_filter.clone();
    let checker = tool.clone();
    let installed = match blocking(move || checker.find_installed(&filter)).await {
        Ok(installed) => installed,
        Err(e) => {
            session.fail(format!("Uninstall Failed {}: {}", tag, e));
            return Err(e);
        }
    };

    let Some(id) = installed else {
        session.transition(Phase::NotInstalled, format!("APPX Not Installed! {}", tag))?;
        return Ok(DeployOutcome::NotInstalled);
    };

    session.note(format!("Uninstalling {}...", id));
    match blocking(move || tool.uninstall(&id)).await {
        Ok(true) => {
            session.transition(Phase::Uninstalled, format!("Uninstall Completed! {}", tag))?;
            Ok(DeployOutcome::Uninstalled)
        }
        Ok(false) => {
            session.fail(format!("Uninstall Failed {}", tag));
            Ok(DeployOutcome::Failed)
        }
        Err(e) => {
            session.fail(format!("Uninstall Failed {}: {}", tag, e));
            Err(e)
        }
    }
}
