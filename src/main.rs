//! Relnotes: release note generator and GitHub release publisher for
//! repositories that ship several projects side by side.
//!
//! This is the main entry point for the `relnotes` CLI. It parses arguments,
//! sets up logging, dispatches to the command handler, and maps errors to
//! exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod exit_codes;
pub mod fs;
pub mod git;
pub mod manifest;
pub mod naming;
pub mod publish;
pub mod render;
pub mod tools;

#[cfg(test)]
mod test_support;

use cli::Cli;
use env_logger::Env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
