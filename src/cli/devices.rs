use cobble::core::{CobbleError, CobbleResult};

pub async fn run() -> CobbleResult<()> {
    let tool = super::deploy_tool()?;
    let ip = tool.device_ip().to_string();

    let connected = tokio::task::spawn_blocking(move || tool.devices())
        .await
        .map_err(|e| CobbleError::Workflow(format!("Background task failed: {}", e)))??;

    if !connected {
        return Err(CobbleError::DeviceNotConnected(ip));
    }
    println!("✓ Device connected at {}", ip);
    Ok(())
}
