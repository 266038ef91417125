use cobble::core::{CobbleError, CobbleResult};
use cobble::workflow::{self, DeployOutcome};

pub async fn run(show_progress: bool) -> CobbleResult<()> {
    let (mut services, mut session) = super::start(show_progress)?;

    match workflow::uninstall(&mut services, &mut session).await? {
        DeployOutcome::Failed => Err(CobbleError::Deploy(
            "The deployment tool reported a failure (run with -v for its output)".to_string(),
        )),
        _ => Ok(()),
    }
}
