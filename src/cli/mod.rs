pub mod check;
pub mod config;
pub mod devices;
pub mod download;
pub mod install;
pub mod list;
pub mod status;
pub mod uninstall;

use cobble::core::CobbleResult;
use cobble::deploy::DeployTool;
use cobble::di::ServiceContainer;
use cobble::workflow::Session;

/// Load services and start a fresh action
pub(crate) fn start(show_progress: bool) -> CobbleResult<(ServiceContainer, Session)> {
    let services = ServiceContainer::new(show_progress)?;
    let session = Session::new(services.reporter.clone());
    Ok((services, session))
}

/// Locate the deployment tool for the commands that talk to it directly
pub(crate) fn deploy_tool() -> CobbleResult<DeployTool> {
    let mut services = ServiceContainer::new(false)?;
    services.deploy_tool()
}
