use crate::core::path::{config_file, default_work_dir, ensure_dir, WORK_DIR_NAME};
use crate::core::{CobbleError, CobbleResult};
use crate::deploy::SuccessCheck;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Release manifest published alongside the APPX builds
pub const DEFAULT_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/bitrvmpd/Pebble-W10M/master/version.js";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the JSON release manifest
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,

    /// Windows 10 SDK root ("Windows Kits\10"); the deployment tool lives
    /// under bin\x86 inside it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_path: Option<PathBuf>,

    /// Explicit path to WinAppDeployCmd, takes precedence over `sdk_path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy_tool: Option<PathBuf>,

    /// Address passed to every deployment command as `-ip`
    #[serde(default = "default_device_ip")]
    pub device_ip: String,

    /// Substring identifying our package in `list` output
    #[serde(default = "default_package_filter")]
    pub package_filter: String,

    /// Folder that holds Cobble's `Res` directory; only `Res` is ever
    /// wiped, never the folder itself
    ///
    /// Default `Res` locations:
    /// - Windows: %LOCALAPPDATA%\cobble\Res
    /// - Linux: ~/.local/share/cobble/Res
    /// - macOS: ~/Library/Application Support/cobble/Res
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,

    /// How deployment results are classified
    /// - "exit-code": the tool's exit status (default)
    /// - "output-match": look for the tool's English success message
    #[serde(default)]
    pub success_check: SuccessCheck,

    /// Pause after the device is detected, before deploying
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
}

fn default_manifest_url() -> String {
    DEFAULT_MANIFEST_URL.to_string()
}

fn default_device_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_package_filter() -> String {
    "PebbleWuff".to_string()
}

fn default_connect_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            sdk_path: None,
            deploy_tool: None,
            device_ip: default_device_ip(),
            package_filter: default_package_filter(),
            work_dir: None,
            success_check: SuccessCheck::default(),
            connect_delay_ms: default_connect_delay_ms(),
        }
    }
}

impl Config {
    /// Load config from the Cobble home directory, creating a default one
    /// if it doesn't exist
    ///
    /// Config locations:
    /// - $COBBLE_HOME/config.yaml when set
    /// - Windows: %APPDATA%\cobble\config.yaml
    /// - Linux: ~/.config/cobble/config.yaml
    /// - macOS: ~/Library/Application Support/cobble/config.yaml
    pub fn load() -> CobbleResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CobbleResult<Self> {
        let content = fs::read_to_string(path)?;
        // An empty file is a valid, all-defaults config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| CobbleError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the Cobble home directory
    pub fn save(&self) -> CobbleResult<()> {
        self.save_to(&config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> CobbleResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| CobbleError::Path("Invalid config path".to_string()))?;
        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| CobbleError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the working directory path (`<work_dir>/Res` when configured)
    pub fn get_work_dir(&self) -> CobbleResult<PathBuf> {
        match self.work_dir {
            Some(ref dir) => Ok(dir.join(WORK_DIR_NAME)),
            None => default_work_dir(),
        }
    }
}
