use cobble::core::{CobbleError, CobbleResult};
use cobble::workflow::{self, DeployOutcome, InstallOptions};

pub async fn run(offline: bool, show_progress: bool) -> CobbleResult<()> {
    let (mut services, mut session) = super::start(show_progress)?;
    let options = InstallOptions {
        skip_check: offline,
    };

    match workflow::install(&mut services, &mut session, options).await? {
        DeployOutcome::Failed => Err(CobbleError::Deploy(
            "The deployment tool reported a failure (run with -v for its output)".to_string(),
        )),
        _ => Ok(()),
    }
}
