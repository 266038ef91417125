use crate::core::error::{CobbleError, CobbleResult};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that relocates every Cobble file (config, state, packages)
pub const COBBLE_HOME_ENV: &str = "COBBLE_HOME";

/// Get the Cobble home directory
///
/// `COBBLE_HOME` wins when set. Otherwise:
/// - Windows: %APPDATA%\cobble
/// - Linux: ~/.config/cobble
/// - macOS: ~/Library/Application Support/cobble
pub fn cobble_home() -> CobbleResult<PathBuf> {
    if let Some(home) = home_override() {
        return Ok(home);
    }
    let config_dir = dirs::config_dir()
        .ok_or_else(|| CobbleError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("cobble"))
}

/// Get the data directory that holds downloaded packages
///
/// `COBBLE_HOME` wins when set. Otherwise:
/// - Windows: %LOCALAPPDATA%\cobble
/// - Linux: ~/.local/share/cobble
/// - macOS: ~/Library/Application Support/cobble
pub fn data_dir() -> CobbleResult<PathBuf> {
    if let Some(home) = home_override() {
        return Ok(home);
    }
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| CobbleError::Path("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("cobble"))
}

fn home_override() -> Option<PathBuf> {
    env::var_os(COBBLE_HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Get the config file path (<home>/config.yaml)
pub fn config_file() -> CobbleResult<PathBuf> {
    Ok(cobble_home()?.join("config.yaml"))
}

/// Get the persisted release state path (<home>/state.yaml)
pub fn state_file() -> CobbleResult<PathBuf> {
    Ok(cobble_home()?.join("state.yaml"))
}

/// Folder Cobble owns and recreates on every download
pub const WORK_DIR_NAME: &str = "Res";

/// Default working directory for the downloaded package (<data>/Res)
pub fn default_work_dir() -> CobbleResult<PathBuf> {
    Ok(data_dir()?.join(WORK_DIR_NAME))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> CobbleResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
