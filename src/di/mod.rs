//! Dependency injection for Cobble
//!
//! Every seam that talks to the outside world (release server, deployment
//! tool, user-facing status output) is a trait object held by the
//! [`ServiceContainer`], so actions can run against mocks in tests.
//!
//! # Example (Production)
//! ```no_run
//! use cobble::di::ServiceContainer;
//!
//! # fn example() -> cobble::core::CobbleResult<()> {
//! let container = ServiceContainer::new(true)?;
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod mocks;

// Re-export key types
pub use crate::deploy::CommandRunner;
pub use crate::update::ReleaseSource;
pub use crate::workflow::StatusReporter;
pub use container::ServiceContainer;
