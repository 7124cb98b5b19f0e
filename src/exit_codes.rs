//! Exit code constants for the relnotes CLI.
//!
//! - 0: Success
//! - 1: User error (missing or malformed inputs, bad config)
//! - 2: A required external tool is not installed
//! - 3: An external tool failed or a ref could not be resolved

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: missing manifest/template, unknown project, missing version.
pub const USER_ERROR: i32 = 1;

/// `git` or `gh` could not be located.
pub const TOOL_UNAVAILABLE: i32 = 2;

/// `git` or `gh` returned a non-zero exit code.
pub const TOOL_FAILURE: i32 = 3;
