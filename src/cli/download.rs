use cobble::core::CobbleResult;
use cobble::workflow;

pub async fn run(force: bool, show_progress: bool) -> CobbleResult<()> {
    let (mut services, mut session) = super::start(show_progress)?;
    let result = workflow::check(&services, &mut session).await?;

    if !result.decision.is_available() && !force {
        return Ok(());
    }

    let package = workflow::download(&mut services, &mut session, &result.remote).await?;
    println!("  Package: {}", package.display());
    Ok(())
}
