//! Invocation of the vendor deployment tool (WinAppDeployCmd).

pub mod locate;
pub mod runner;
pub mod tool;

pub use locate::{locate_or_prompt, locate_tool, TOOL_NAME};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use tool::{DeployTool, SuccessCheck};
