//! Executor that actually runs commands.

use super::{CommandExecutor, CommandOutput, Invocation};
use crate::error::{ReleaseError, Result};
use std::process::Command;

/// Spawns each command and blocks until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<CommandOutput> {
        log::debug!("$ {}", invocation.command_line());

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output()
            .map_err(|e| ReleaseError::ToolExecution {
                command: invocation.command_line(),
                exit_code: None,
                message: format!(
                    "failed to execute {}: {}",
                    invocation.program.display(),
                    e
                ),
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            simulated: false,
        })
    }
}
