//! Locally recorded release of the downloaded package.
//!
//! Loaded once at startup and handed to the workflow; only a completed
//! download writes it back.

use crate::core::path::ensure_dir;
use crate::core::{CobbleError, CobbleResult};
use crate::manifest::{LocalRelease, ReleaseManifest};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalState {
    #[serde(default = "default_version")]
    pub current_version: String,

    #[serde(default = "default_release")]
    pub current_release: String,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

fn default_release() -> String {
    "alpha".to_string()
}

impl Default for LocalState {
    fn default() -> Self {
        Self {
            current_version: default_version(),
            current_release: default_release(),
        }
    }
}

impl LocalState {
    /// Load the state file, falling back to defaults when none was written yet
    pub fn load_from(path: &Path) -> CobbleResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| CobbleError::Config(format!("Failed to parse state file: {}", e)))
    }

    /// Write through a sibling temp file and rename over the target, so a
    /// crash never leaves a half-written state file behind
    pub fn save_to(&self, path: &Path) -> CobbleResult<()> {
        let dir = path
            .parent()
            .ok_or_else(|| CobbleError::Path("Invalid state path".to_string()))?;
        ensure_dir(dir)?;

        let content = serde_yaml::to_string(self)?;
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, content)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %path.display(), "state saved");
        Ok(())
    }

    /// Parse the recorded pair; an unknown channel fails the comparison
    pub fn local_release(&self) -> CobbleResult<LocalRelease> {
        LocalRelease::parse(&self.current_version, &self.current_release)
    }

    /// Record a freshly downloaded release
    pub fn record(&mut self, manifest: &ReleaseManifest) {
        self.current_version = manifest.version.to_string();
        self.current_release = manifest.channel.to_string();
    }

    /// `v{version}-{release}` as shown in status lines
    pub fn tag(&self) -> String {
        format!("v{}-{}", self.current_version, self.current_release)
    }
}
