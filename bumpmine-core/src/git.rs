//! Log extraction via the `git` CLI
//!
//! Runs `git log` with the commit record template and returns its stdout.
//! The repository path is handed to the child process as its working
//! directory; the current process never changes directory.

use crate::error::{Error, Result};
use crate::ingest::record::{pretty_format_arg, TEMPLATE_VERSION};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Reads the full commit history of one repository.
#[derive(Debug, Clone)]
pub struct GitLog {
    repo_path: PathBuf,
}

impl GitLog {
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Arguments passed to `git`.
    pub fn log_args() -> Vec<String> {
        vec![
            "--no-pager".to_string(),
            "log".to_string(),
            pretty_format_arg(),
        ]
    }

    /// Run `git log` over every commit reachable from HEAD.
    ///
    /// Output is decoded lossily; invalid UTF-8 turns into replacement
    /// characters, which sanitization later drops. A repository whose HEAD
    /// is unborn (no commits yet) has an empty history, not a failure.
    pub fn read_log(&self) -> Result<String> {
        tracing::info!(
            repo = %self.repo_path.display(),
            template_version = TEMPLATE_VERSION,
            "Reading git log"
        );

        let output = Command::new("git")
            .args(Self::log_args())
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| {
                Error::Extraction(format!(
                    "failed to run git in {}: {}",
                    self.repo_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            if self.has_unborn_head() {
                tracing::info!(
                    repo = %self.repo_path.display(),
                    "Repository has no commits yet"
                );
                return Ok(String::new());
            }

            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Extraction(format!(
                "git log in {} exited with {}: {}",
                self.repo_path.display(),
                output.status,
                stderr.trim()
            )));
        }

        let log = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(bytes = log.len(), "git log finished");
        Ok(log)
    }

    /// Inside a work tree, but `HEAD` does not resolve to a commit.
    fn has_unborn_head(&self) -> bool {
        self.git_succeeds(&["rev-parse", "--is-inside-work-tree"])
            && !self.git_succeeds(&["rev-parse", "--verify", "-q", "HEAD"])
    }

    fn git_succeeds(&self, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}
