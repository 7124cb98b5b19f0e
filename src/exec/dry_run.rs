//! Executor that only reports what it would run.

use super::{CommandExecutor, CommandOutput, Invocation};
use crate::error::Result;
use std::cell::RefCell;

/// Logs each command line instead of running it.
///
/// Every command "succeeds" with empty output and `simulated` set; callers
/// that need an answer (probes, ref resolution) treat simulated output as
/// "nothing there yet".
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    planned: RefCell<Vec<String>>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command lines reported so far, in order.
    pub fn planned(&self) -> Vec<String> {
        self.planned.borrow().clone()
    }
}

impl CommandExecutor for DryRunExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let line = invocation.command_line();
        log::info!("[dry-run] {}", line);
        self.planned.borrow_mut().push(line);
        Ok(CommandOutput::simulated())
    }

    fn simulates(&self) -> bool {
        true
    }
}
