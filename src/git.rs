//! Read-only git inspection for relnotes.
//!
//! Provides a wrapper around git commands with captured stdout/stderr for the
//! local lookups done before publishing: repository root, remote URL, and
//! default branch. Commands that change tags or talk to the remote go through
//! [`crate::exec`] instead so they honor dry-run.

use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::LazyLock;

/// Matches `github.com/owner/repo(.git)` in https, ssh, and scp-style URLs.
static GITHUB_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[:/]+([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("static regex is valid")
});

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(ReleaseError::ToolExecution)` - On spawn failure or non-zero exit
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    let command_line = format!("git {}", shell_words::join(args));

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| ReleaseError::ToolExecution {
            command: command_line.clone(),
            exit_code: None,
            message: format!("failed to execute git: {}", e),
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let message = if git_output.stderr.is_empty() {
            git_output.stdout
        } else {
            git_output.stderr
        };
        Err(ReleaseError::ToolExecution {
            command: command_line,
            exit_code: output.status.code(),
            message,
        })
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let output = run_git(cwd, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(&output.stdout))
}

/// GitHub coordinates of the repository, as far as they could be detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub default_branch: Option<String>,
}

impl RepoInfo {
    /// True when owner and name are both known.
    pub fn is_github(&self) -> bool {
        self.owner.is_some() && self.name.is_some()
    }
}

/// Detect owner/name from `remote`'s URL and its default branch.
///
/// Never fails: anything that cannot be determined is left as `None`.
pub fn detect_repo_info<P: AsRef<Path>>(repo_root: P, remote: &str) -> RepoInfo {
    let repo_root = repo_root.as_ref();
    let mut info = RepoInfo::default();

    match run_git(repo_root, &["remote", "get-url", remote]) {
        Ok(output) => {
            if let Some((owner, name)) = parse_github_remote(&output.stdout) {
                info.owner = Some(owner);
                info.name = Some(name);
            } else {
                log::debug!("remote '{}' is not a GitHub URL: {}", remote, output.stdout);
            }
        }
        Err(e) => log::debug!("could not read remote '{}': {}", remote, e),
    }

    info.default_branch = detect_default_branch(repo_root, remote);
    info
}

/// Parse `(owner, repo)` from a GitHub remote URL.
pub fn parse_github_remote(url: &str) -> Option<(String, String)> {
    let caps = GITHUB_REMOTE.captures(url.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// The remote's HEAD branch, else the currently checked out branch.
fn detect_default_branch(repo_root: &Path, remote: &str) -> Option<String> {
    let remote_head = format!("refs/remotes/{}/HEAD", remote);
    if let Ok(output) = run_git(repo_root, &["symbolic-ref", "--short", &remote_head]) {
        let prefix = format!("{}/", remote);
        if let Some(branch) = output.stdout.strip_prefix(&prefix) {
            return Some(branch.to_string());
        }
    }

    match run_git(repo_root, &["rev-parse", "--abbrev-ref", "HEAD"]) {
        // Detached HEAD reports the literal "HEAD".
        Ok(output) if !output.stdout.is_empty() && output.stdout != "HEAD" => Some(output.stdout),
        _ => None,
    }
}
