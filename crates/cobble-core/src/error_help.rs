//! User-facing hints attached to errors printed by the CLI.

use crate::core::error::CobbleError;

/// Short, actionable advice for an error
pub trait ErrorHelp {
    fn help(&self) -> Option<&'static str>;
}

impl ErrorHelp for CobbleError {
    fn help(&self) -> Option<&'static str> {
        match self {
            CobbleError::Http(_) => {
                Some("Check your internet connection or the manifest URL (cobble config show).")
            }
            CobbleError::Manifest(_) => {
                Some("The release manifest looks malformed; try again later or set another URL.")
            }
            CobbleError::Version(_) => Some(
                "Versions are dotted numbers and channels are alpha, beta, rc or stable. \
                 Check state.yaml if the local release was edited by hand.",
            ),
            CobbleError::Archive(_) => {
                Some("The downloaded package is damaged. Run 'cobble download --force'.")
            }
            CobbleError::Package(_) => Some("Run 'cobble download' to fetch the package first."),
            CobbleError::ToolNotFound(_) => Some(
                "Install the Windows 10 SDK, then run 'cobble config set-sdk-path <Windows Kits\\10 folder>'.",
            ),
            CobbleError::DeviceNotConnected(_) => Some(
                "Connect the phone over USB, unlock it and enable Developer Mode and Device Discovery.",
            ),
            CobbleError::Config(_) | CobbleError::Yaml(_) => {
                Some("Fix or delete config.yaml; a default one is created on next run.")
            }
            _ => None,
        }
    }
}

/// Render an error followed by its hint, if it has one
pub fn format_error_with_help(error: &CobbleError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\nHelp: {}", error, help),
        None => format!("Error: {}", error),
    }
}
