//! Release checking: the update gate and the remote release source.

pub mod client;
pub mod gate;

pub use client::{HttpReleaseSource, ReleaseSource};
pub use gate::{evaluate, should_update, UpdateDecision, UpdateReason};
