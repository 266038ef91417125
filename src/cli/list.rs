use cobble::core::{CobbleError, CobbleResult};

pub async fn run() -> CobbleResult<()> {
    let tool = super::deploy_tool()?;

    let lines = tokio::task::spawn_blocking(move || tool.list())
        .await
        .map_err(|e| CobbleError::Workflow(format!("Background task failed: {}", e)))??;

    if lines.is_empty() {
        println!("No installed packages reported.");
        return Ok(());
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
