//! Core utilities shared by the Cobble CLI and library.
//!
//! Holds the error type, dotted version and release channel handling, and
//! the platform paths Cobble reads and writes.

pub mod core {
    pub mod error;
    pub mod path;
    pub mod version;
}

pub mod error_help;

pub use crate::core::error::{CobbleError, CobbleResult};
pub use crate::core::version::{ReleaseChannel, Version};
pub use error_help::{format_error_with_help, ErrorHelp};
