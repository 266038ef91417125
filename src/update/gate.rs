use crate::manifest::{LocalRelease, ReleaseManifest};
use std::cmp::Ordering;
use std::fmt;

/// Why a remote release should be downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateReason {
    /// Remote version number is higher
    NewerVersion,
    /// Same version number, higher release channel
    NewerChannel,
    /// Same release, but the package is missing on disk
    MissingArtifact,
}

impl fmt::Display for UpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UpdateReason::NewerVersion => "newer version",
            UpdateReason::NewerChannel => "newer release channel",
            UpdateReason::MissingArtifact => "local package missing",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    UpToDate,
    UpdateAvailable(UpdateReason),
}

impl UpdateDecision {
    pub fn is_available(&self) -> bool {
        matches!(self, UpdateDecision::UpdateAvailable(_))
    }
}

/// Decide whether `remote` should replace the local release
///
/// Version number first, then release channel, then whether the package
/// file is still on disk.
pub fn evaluate(
    local: &LocalRelease,
    remote: &ReleaseManifest,
    local_file_exists: bool,
) -> UpdateDecision {
    match remote.version.cmp(&local.version) {
        Ordering::Less => UpdateDecision::UpToDate,
        Ordering::Greater => UpdateDecision::UpdateAvailable(UpdateReason::NewerVersion),
        Ordering::Equal if local.channel >= remote.channel => {
            if local_file_exists {
                UpdateDecision::UpToDate
            } else {
                UpdateDecision::UpdateAvailable(UpdateReason::MissingArtifact)
            }
        }
        Ordering::Equal => UpdateDecision::UpdateAvailable(UpdateReason::NewerChannel),
    }
}

pub fn should_update(local: &LocalRelease, remote: &ReleaseManifest, local_file_exists: bool) -> bool {
    evaluate(local, remote, local_file_exists).is_available()
}
