//! External command execution.
//!
//! Every command the publish phase runs goes through a [`CommandExecutor`].
//! Two implementations exist:
//!
//! - [`SystemExecutor`] spawns the process and waits for it
//! - [`DryRunExecutor`] logs the command line and returns a simulated result
//!
//! The executor is chosen once per run, so call sites never branch on a
//! dry-run flag themselves.

mod dry_run;
mod system;

pub use dry_run::DryRunExecutor;
pub use system::SystemExecutor;

use crate::error::{ReleaseError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A fully specified command: program, arguments, working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-quoted command line for logs and error messages.
    ///
    /// The program is shown by file stem so `/usr/bin/gh` reads as `gh`.
    pub fn command_line(&self) -> String {
        let program = program_label(&self.program);
        let mut words = vec![program];
        words.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        shell_words::join(words)
    }
}

fn program_label(program: &Path) -> String {
    program
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// Captured result of an executed (or simulated) command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Standard output (trimmed).
    pub stdout: String,
    /// Standard error (trimmed).
    pub stderr: String,
    /// True when the command was not actually run.
    pub simulated: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stderr, or stdout when stderr is empty.
    pub fn diagnostic(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }

    /// Simulated success used by the dry-run executor.
    pub fn simulated() -> Self {
        Self {
            exit_code: Some(0),
            simulated: true,
            ..Default::default()
        }
    }
}

/// Outcome of checking whether a remote or local resource exists.
#[derive(Debug)]
pub enum Probe {
    /// The resource exists; carries the identifying output (e.g. a SHA).
    Found(String),
    /// The tool answered definitively that the resource does not exist.
    NotFound,
    /// The tool failed for some other reason.
    Error(ReleaseError),
}

impl Probe {
    /// Convert to `Result<Option<_>>`, surfacing real failures.
    pub fn into_result(self) -> Result<Option<String>> {
        match self {
            Probe::Found(value) => Ok(Some(value)),
            Probe::NotFound => Ok(None),
            Probe::Error(err) => Err(err),
        }
    }
}

/// Capability to run external commands.
pub trait CommandExecutor {
    /// Run the command and capture its output regardless of exit code.
    ///
    /// Errors only when the process cannot be started.
    fn execute(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Whether commands are only reported, never run.
    fn simulates(&self) -> bool {
        false
    }

    /// Run the command and fail with `ToolExecution` on a non-zero exit.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let output = self.execute(invocation)?;
        if output.success() {
            Ok(output)
        } else {
            Err(execution_error(invocation, &output))
        }
    }
}

/// Build the `ToolExecution` error for a failed command.
pub fn execution_error(invocation: &Invocation, output: &CommandOutput) -> ReleaseError {
    ReleaseError::ToolExecution {
        command: invocation.command_line(),
        exit_code: output.exit_code,
        message: output.diagnostic().to_string(),
    }
}
