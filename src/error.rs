//! Error types for commit-each modules using thiserror.

use std::time::Duration;

use thiserror::Error;

/// Errors from invoking the git executable.
///
/// Every variant carries the rendered command line so the printed
/// diagnostic names exactly what was run.
#[derive(Error, Debug)]
pub enum GitError {
    #[error(
        "Error running command '{command}': git executable '{program}' not found. Install git or point COMMIT_EACH_GIT at it"
    )]
    NotInstalled { command: String, program: String },

    #[error("Error running command '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error running command '{command}': {stderr}")]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Error running command '{command}': timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
}

impl GitError {
    /// The command line this error refers to.
    pub fn command(&self) -> &str {
        match self {
            GitError::NotInstalled { command, .. }
            | GitError::SpawnFailed { command, .. }
            | GitError::NonZeroExit { command, .. }
            | GitError::Timeout { command, .. } => command,
        }
    }
}

/// Errors that end a run before any file is processed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("{0}")]
    StatusFailed(#[source] GitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_display_matches_diagnostic_format() {
        let err = GitError::NonZeroExit {
            command: "git add -- missing.txt".to_string(),
            code: Some(128),
            stderr: "fatal: pathspec 'missing.txt' did not match any files".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Error running command 'git add -- missing.txt': fatal: pathspec 'missing.txt' did not match any files"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = GitError::Timeout {
            command: "git status --porcelain".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(
            err.to_string(),
            "Error running command 'git status --porcelain': timed out after 5s"
        );
    }

    #[test]
    fn test_not_installed_display_names_the_status_command() {
        let err = GitError::NotInstalled {
            command: "git -c core.quotePath=false status --porcelain".to_string(),
            program: "git".to_string(),
        };
        assert!(
            err.to_string()
                .starts_with("Error running command 'git -c core.quotePath=false status --porcelain': git executable 'git' not found")
        );
    }

    #[test]
    fn test_command_accessor() {
        let err = GitError::NotInstalled {
            command: "git status --porcelain".to_string(),
            program: "git".to_string(),
        };
        assert_eq!(err.command(), "git status --porcelain");

        let err = GitError::NonZeroExit {
            command: "git commit -m x".to_string(),
            code: Some(1),
            stderr: String::new(),
        };
        assert_eq!(err.command(), "git commit -m x");
    }

    #[test]
    fn test_run_error_is_transparent_over_git_error() {
        let err = RunError::StatusFailed(GitError::NonZeroExit {
            command: "git status --porcelain".to_string(),
            code: Some(128),
            stderr: "fatal: not a git repository".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Error running command 'git status --porcelain': fatal: not a git repository"
        );
    }
}
