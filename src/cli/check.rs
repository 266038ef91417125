use cobble::core::CobbleResult;
use cobble::workflow;

pub async fn run(show_progress: bool) -> CobbleResult<()> {
    let (services, mut session) = super::start(show_progress)?;
    let result = workflow::check(&services, &mut session).await?;

    if result.decision.is_available() {
        println!("\nRun 'cobble install' to download and deploy it.");
    }
    Ok(())
}
