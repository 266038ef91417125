use cobble::config::Config;
use cobble::core::path::config_file;
use cobble::core::{CobbleError, CobbleResult};
use cobble::deploy::locate::sdk_tool_path;
use std::fs;
use std::path::PathBuf;

pub fn show() -> CobbleResult<()> {
    let config = Config::load()?;
    println!("# {}", config_file()?.display());
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

pub fn set_sdk_path(path: PathBuf) -> CobbleResult<()> {
    let tool = sdk_tool_path(&path);
    if !tool.is_file() {
        // Accepted anyway: the SDK may live on a drive that is not mounted now
        eprintln!("Warning: {} does not exist", tool.display());
    }

    let mut config = Config::load()?;
    config.sdk_path = Some(path.clone());
    config.save()?;

    println!("✓ SDK path set to: {}", path.display());
    Ok(())
}

pub fn set_manifest_url(url: String) -> CobbleResult<()> {
    let url = url.trim().to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(CobbleError::Config(format!(
            "Manifest URL must start with http:// or https://: {}",
            url
        )));
    }

    let mut config = Config::load()?;
    config.manifest_url = url;
    config.save()?;

    println!("✓ Manifest URL set to: {}", config.manifest_url);
    Ok(())
}

pub fn set_work_dir(path: PathBuf) -> CobbleResult<()> {
    if !path.exists() {
        fs::create_dir_all(&path)
            .map_err(|e| CobbleError::Path(format!("Failed to create directory: {}", e)))?;
    }

    let mut config = Config::load()?;
    config.work_dir = Some(path.clone());
    config.save()?;

    println!("✓ Working directory set to: {}", config.get_work_dir()?.display());
    Ok(())
}
