use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{GitError, Result};

/// Thin wrapper over the `git` binary, rooted in a working tree.
///
/// Every query runs `git` as a subprocess with the working tree as its
/// current directory, so the host's git installation, configuration, and
/// credentials apply unchanged.
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `refspec` to a commit SHA.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] when the ref does not resolve.
    pub fn rev_parse(&self, refspec: &str) -> Result<String> {
        self.run(&["rev-parse", refspec])
    }

    /// Paths changed between `base` and `head`, relative to the repository
    /// root.
    ///
    /// Uses the three-dot range, so only changes on the head side of the
    /// merge base count. That matches what a pull request shows.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] when either end of the range is
    /// not available locally.
    pub fn changed_files(&self, base: &str, head: &str) -> Result<Vec<String>> {
        let range = format!("{base}...{head}");
        Ok(lines(&self.run(&["diff", "--name-only", &range])?))
    }

    /// Paths deleted between `base` and `head`, restricted to `pathspec`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] when either end of the range is
    /// not available locally.
    pub fn deleted_files(&self, base: &str, head: &str, pathspec: &str) -> Result<Vec<String>> {
        let range = format!("{base}...{head}");
        Ok(lines(&self.run(&[
            "diff",
            "--name-only",
            "--diff-filter=D",
            &range,
            "--",
            pathspec,
        ])?))
    }

    /// Contents of `path` as committed in `revision`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] when the revision or the path
    /// within it does not exist.
    pub fn show(&self, revision: &str, path: &str) -> Result<String> {
        let spec = format!("{revision}:{path}");
        self.run(&["show", &spec])
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::Spawn {
                args: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                args: args.join(" "),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

fn lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
