//! Published release manifest and the locally recorded release.

use crate::core::{CobbleError, CobbleResult, ReleaseChannel, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A published package release, as served by the manifest URL
///
/// Wire format:
///
/// ```json
/// {"Url": "...", "Release": "beta", "VersionNumber": "1.2", "FileName": "Pebble.appx"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    #[serde(rename = "VersionNumber")]
    pub version: Version,

    #[serde(rename = "Release")]
    pub channel: ReleaseChannel,

    #[serde(rename = "Url")]
    pub download_url: String,

    #[serde(rename = "FileName")]
    pub file_name: String,
}

impl ReleaseManifest {
    /// Parse and validate a manifest body
    pub fn parse(json: &str) -> CobbleResult<Self> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| CobbleError::Manifest(format!("Invalid release manifest: {}", e)))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> CobbleResult<()> {
        if self.download_url.trim().is_empty() {
            return Err(CobbleError::Manifest("Manifest has an empty Url".to_string()));
        }

        let name = self.file_name.trim();
        if name.is_empty() {
            return Err(CobbleError::Manifest(
                "Manifest has an empty FileName".to_string(),
            ));
        }
        // The file name is joined onto the working directory
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(CobbleError::Manifest(format!(
                "FileName must be a bare file name, got '{}'",
                self.file_name
            )));
        }
        Ok(())
    }

    /// `v{version}-{channel}` as shown in status lines
    pub fn tag(&self) -> String {
        format!("v{}-{}", self.version, self.channel)
    }
}

impl fmt::Display for ReleaseManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag(), self.file_name)
    }
}

/// The release recorded for the package currently on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRelease {
    pub version: Version,
    pub channel: ReleaseChannel,
}

impl LocalRelease {
    pub fn new(version: Version, channel: ReleaseChannel) -> Self {
        Self { version, channel }
    }

    pub fn parse(version: &str, channel: &str) -> CobbleResult<Self> {
        Ok(Self {
            version: Version::parse(version)?,
            channel: ReleaseChannel::parse(channel)?,
        })
    }
}
