//! Git revision access through the `git` executable.
//!
//! All commands run in the current working directory, so paths given to
//! [`show_file`] are resolved relative to it.

use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum GitError {
    /// `git` could not be started at all.
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// `git` ran and exited with a failure status.
    #[error("git {command} failed: {stderr}")]
    Command { command: String, stderr: String },

    /// A revision did not resolve to a commit.
    #[error("unknown revision '{0}'")]
    UnknownRef(String),
}

pub type Result<T> = std::result::Result<T, GitError>;

async fn run_git(args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).output().await?;

    if !output.status.success() {
        return Err(GitError::Command {
            command: args.first().copied().unwrap_or_default().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Fail unless `git_ref` names a commit.
pub async fn verify_ref(git_ref: &str) -> Result<()> {
    let spec = format!("{}^{{commit}}", git_ref);
    match run_git(&["rev-parse", "--verify", "--quiet", &spec]).await {
        Ok(_) => Ok(()),
        Err(GitError::Command { .. }) => Err(GitError::UnknownRef(git_ref.to_string())),
        Err(e) => Err(e),
    }
}

/// Content of `path` at `git_ref`, or `None` when the file does not exist there.
pub async fn show_file(git_ref: &str, path: &str) -> Result<Option<String>> {
    let path = path.trim_start_matches("./");
    let spec = format!("{}:./{}", git_ref, path);
    match run_git(&["show", &spec]).await {
        Ok(content) => Ok(Some(content)),
        Err(GitError::Command { stderr, .. }) => {
            tracing::debug!("{} not found at {}: {}", path, git_ref, stderr);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Files below `folder` at `git_ref`, relative to the working directory.
pub async fn list_files(git_ref: &str, folder: &str) -> Result<Vec<String>> {
    let output = run_git(&["ls-tree", "-r", "--name-only", git_ref, "--", folder]).await?;

    Ok(output
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Subjects of the commits reachable from `head_ref` but not from `base_ref`.
pub async fn log_subjects(base_ref: &str, head_ref: &str) -> Result<Vec<String>> {
    let range = format!("{}..{}", base_ref, head_ref);
    let output = run_git(&["log", &range, "--pretty=format:%s"]).await?;

    Ok(output
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
