//! Command implementations for relnotes.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod generate;
mod list;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Generate(args) => generate::cmd_generate(args),
        Command::List(args) => list::cmd_list(args),
    }
}
