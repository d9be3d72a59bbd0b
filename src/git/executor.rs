//! The three git operations a run needs, behind a mockable trait.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::GitError;

use super::subprocess::{check_git_installed, render_command, run_git};

/// How `git status` lists untracked files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UntrackedFiles {
    /// Untracked directories are listed as a single `dir/` entry.
    #[default]
    Normal,
    /// Every untracked file is listed individually.
    All,
    /// Untracked files are not listed.
    No,
}

impl UntrackedFiles {
    pub fn as_str(&self) -> &'static str {
        match self {
            UntrackedFiles::Normal => "normal",
            UntrackedFiles::All => "all",
            UntrackedFiles::No => "no",
        }
    }
}

impl fmt::Display for UntrackedFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for executing git commands.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Return the porcelain status listing.
    async fn status(&self) -> Result<String, GitError>;

    /// Stage exactly the given repository-relative path.
    async fn stage(&self, path: &str) -> Result<String, GitError>;

    /// Commit whatever is staged with the given message.
    async fn commit(&self, message: &str) -> Result<String, GitError>;
}

/// Executor that calls the real git CLI inside one working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    workdir: PathBuf,
    untracked: UntrackedFiles,
    timeout: Option<Duration>,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
            untracked: UntrackedFiles::default(),
            timeout: None,
        }
    }

    pub fn with_untracked(mut self, untracked: UntrackedFiles) -> Self {
        self.untracked = untracked;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Arguments of the status query.
    ///
    /// `core.quotePath=false` keeps non-ASCII names as raw UTF-8 so they can
    /// be staged as printed; names with spaces or quotes are still quoted.
    fn status_args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["-c", "core.quotePath=false", "status", "--porcelain"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if self.untracked != UntrackedFiles::Normal {
            args.push(format!("--untracked-files={}", self.untracked));
        }
        args
    }

    /// The status query as it will be printed in diagnostics.
    pub fn status_command(&self) -> String {
        let args = self.status_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        render_command(&self.program, &args)
    }

    /// Fail with `GitError::NotInstalled`, naming the status query, when the
    /// git executable cannot be found.
    pub fn check_installed(&self) -> Result<(), GitError> {
        check_git_installed(&self.program, &self.status_command()).map(|_| ())
    }

    async fn git(&self, args: &[&str]) -> Result<String, GitError> {
        run_git(&self.program, &self.workdir, args, self.timeout).await
    }
}

#[async_trait]
impl GitExecutor for GitCli {
    async fn status(&self) -> Result<String, GitError> {
        let args = self.status_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.git(&args).await
    }

    async fn stage(&self, path: &str) -> Result<String, GitError> {
        self.git(&["add", "--", path]).await
    }

    async fn commit(&self, message: &str) -> Result<String, GitError> {
        self.git(&["commit", "-m", message]).await
    }
}
