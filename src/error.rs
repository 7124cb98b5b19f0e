//! Error types for the relnotes CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for relnotes operations.
///
/// Every variant is fatal: the run aborts without rolling back tags or
/// releases that were already pushed.
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// A required input file (manifest, template) does not exist.
    #[error("{what} not found: {}", .path.display())]
    NotFound {
        /// Human-readable name of the missing input.
        what: &'static str,
        /// Path that was checked.
        path: PathBuf,
    },

    /// The manifest could not be parsed.
    #[error("failed to parse manifest '{}': {message}", .path.display())]
    Parse {
        /// Path of the malformed manifest.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The requested project has no manifest entry.
    #[error("project '{0}' not found in manifest")]
    ProjectNotFound(String),

    /// The project entry has neither file-version nor product-version.
    #[error("project '{0}' has no file-version or product-version")]
    MissingVersion(String),

    /// A required external tool could not be located.
    #[error("{tool} is not available: {hint}")]
    ToolUnavailable {
        /// Tool name (`git`, `gh`).
        tool: &'static str,
        /// What was tried and how to fix it.
        hint: String,
    },

    /// A ref could not be resolved to a commit.
    #[error("could not resolve '{reference}' to a commit: {message}")]
    RefResolution {
        /// The ref that was requested.
        reference: String,
        /// Output from git.
        message: String,
    },

    /// An external tool exited non-zero or could not be spawned.
    #[error("{command} failed (exit code {}): {message}", exit_code_label(.exit_code))]
    ToolExecution {
        /// The command line that failed.
        command: String,
        /// Exit code, if the process exited normally.
        exit_code: Option<i32>,
        /// Stderr (or stdout when stderr is empty).
        message: String,
    },

    /// Invalid `.repo/release.yaml` settings.
    #[error("invalid config: {0}")]
    Config(String),

    /// Filesystem failure while reading or writing release files.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl ReleaseError {
    /// Wrap an I/O error with a description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ReleaseError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::NotFound { .. }
            | ReleaseError::Parse { .. }
            | ReleaseError::ProjectNotFound(_)
            | ReleaseError::MissingVersion(_)
            | ReleaseError::Config(_)
            | ReleaseError::Io { .. } => exit_codes::USER_ERROR,
            ReleaseError::ToolUnavailable { .. } => exit_codes::TOOL_UNAVAILABLE,
            ReleaseError::RefResolution { .. } | ReleaseError::ToolExecution { .. } => {
                exit_codes::TOOL_FAILURE
            }
        }
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Result type alias for relnotes operations.
pub type Result<T> = std::result::Result<T, ReleaseError>;
