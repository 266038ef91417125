//! Local storage of the downloaded package.

pub mod workdir;

pub use workdir::WorkDir;
