use crate::config::Config;
use crate::core::{CobbleError, CobbleResult};
use dialoguer::{Confirm, Input};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executable name of the deployment tool shipped with the Windows 10 SDK
pub const TOOL_NAME: &str = "WinAppDeployCmd";

/// Location of the tool relative to the SDK root ("Windows Kits\10")
pub fn sdk_tool_path(sdk_root: &Path) -> PathBuf {
    sdk_root
        .join("bin")
        .join("x86")
        .join(format!("{}.exe", TOOL_NAME))
}

/// Find the deployment tool without asking the user
///
/// Order: explicit `deploy_tool`, then `sdk_path`, then `PATH`.
pub fn locate_tool(config: &Config) -> CobbleResult<PathBuf> {
    if let Some(ref tool) = config.deploy_tool {
        if tool.is_file() {
            return Ok(tool.clone());
        }
        return Err(CobbleError::ToolNotFound(format!(
            "configured deploy_tool {} does not exist",
            tool.display()
        )));
    }

    if let Some(ref sdk) = config.sdk_path {
        let tool = sdk_tool_path(sdk);
        if tool.is_file() {
            return Ok(tool);
        }
        debug!(path = %tool.display(), "deployment tool not under configured SDK path");
    }

    if let Ok(tool) = which::which(TOOL_NAME) {
        return Ok(tool);
    }

    Err(CobbleError::ToolNotFound(
        "Windows 10 SDK not found".to_string(),
    ))
}

/// Find the deployment tool, asking for the SDK location when it is missing
/// and a terminal is attached. A chosen SDK path is saved to the config.
pub fn locate_or_prompt(config: &mut Config, interactive: bool) -> CobbleResult<PathBuf> {
    match locate_tool(config) {
        Ok(tool) => Ok(tool),
        Err(CobbleError::ToolNotFound(reason)) if interactive && config.deploy_tool.is_none() => {
            prompt_for_sdk(config, &reason)
        }
        Err(e) => Err(e),
    }
}

fn prompt_for_sdk(config: &mut Config, reason: &str) -> CobbleResult<PathBuf> {
    let installed = Confirm::new()
        .with_prompt(format!("{}. Do you have it installed?", reason))
        .default(true)
        .interact()
        .map_err(|e| CobbleError::Config(format!("Prompt failed: {}", e)))?;

    if !installed {
        return Err(CobbleError::ToolNotFound(
            "Please install the Windows 10 SDK first".to_string(),
        ));
    }

    let answer: String = Input::new()
        .with_prompt("Location of the \"Windows Kits\\10\" folder")
        .interact_text()
        .map_err(|e| CobbleError::Config(format!("Prompt failed: {}", e)))?;

    let sdk = PathBuf::from(answer.trim());
    let tool = sdk_tool_path(&sdk);
    if !tool.is_file() {
        return Err(CobbleError::ToolNotFound(format!(
            "{} does not exist",
            tool.display()
        )));
    }

    config.sdk_path = Some(sdk);
    config.save()?;
    Ok(tool)
}
