//! Cobble: keeps a sideloaded APPX on a Windows 10 Mobile device current
//!
//! This crate provides the main Cobble library, re-exporting error and
//! version types from `cobble-core` and organizing the release check,
//! package download and device deployment modules.

pub use cobble_core::{format_error_with_help, CobbleError, CobbleResult, ErrorHelp};
pub use cobble_core::{ReleaseChannel, Version};

/// Core module re-exported from cobble-core.
pub mod core {
    pub use cobble_core::core::*;
    pub use cobble_core::*;

    /// Path module re-exported from cobble-core.
    pub mod path {
        pub use cobble_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Locally recorded release.
pub mod state;

/// Remote release manifest.
pub mod manifest;

/// Update gate and release source.
pub mod update;

/// Working directory holding the downloaded package.
pub mod package;

/// Deployment tool invocation.
pub mod deploy;

/// Check, download, install and uninstall actions.
pub mod workflow;

/// Dependency injection infrastructure.
pub mod di;
