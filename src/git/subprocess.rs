//! Git CLI spawning.
//!
//! Operations shell out to the system `git` binary so the user's existing git
//! config, hooks and identity apply unchanged.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::GitError;

/// Environment variable selecting the git executable.
pub const GIT_ENV_VAR: &str = "COMMIT_EACH_GIT";

/// Environment variable setting a per-command timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "COMMIT_EACH_GIT_TIMEOUT";

/// Default git executable name, resolved through `PATH`.
pub const DEFAULT_GIT: &str = "git";

/// Get the configured git executable.
///
/// Reads from COMMIT_EACH_GIT if set and non-empty, otherwise `git`.
pub fn get_git_program() -> PathBuf {
    match env::var(GIT_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v),
        _ => PathBuf::from(DEFAULT_GIT),
    }
}

/// Get the configured per-command timeout.
///
/// Unset, empty or `0` means git commands may run indefinitely.
/// Logs a warning if the environment variable is set but is not a
/// non-negative integer.
pub fn get_timeout() -> Option<Duration> {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', running git without a timeout",
                    TIMEOUT_ENV_VAR, v
                );
                None
            }
        },
        _ => None,
    }
}

/// Check that the git executable can be found.
///
/// Uses the `which` crate for cross-platform executable detection; accepts
/// either a bare name looked up on `PATH` or an explicit path. `command` is
/// the first command line the run would execute and is named in the error.
pub fn check_git_installed(program: &Path, command: &str) -> Result<PathBuf, GitError> {
    which::which(program).map_err(|_| GitError::NotInstalled {
        command: command.to_string(),
        program: program.display().to_string(),
    })
}

/// Render a command line for diagnostics.
///
/// Arguments containing whitespace or quotes are wrapped in double quotes so
/// the printed command reads the way it would be typed.
pub fn render_command(program: &Path, args: &[&str]) -> String {
    let mut parts = vec![program.display().to_string()];
    for arg in args {
        if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
            parts.push(format!("\"{}\"", arg.replace('"', "\\\"")));
        } else {
            parts.push((*arg).to_string());
        }
    }
    parts.join(" ")
}

/// Run git with the given arguments in `workdir` and return its stdout.
///
/// A non-zero exit becomes `GitError::NonZeroExit` carrying the trimmed
/// stderr. When `timeout` elapses the child is killed and
/// `GitError::Timeout` is returned.
pub async fn run_git(
    program: &Path,
    workdir: &Path,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<String, GitError> {
    let command = render_command(program, args);
    debug!("Running {} in {}", command, workdir.display());

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, cmd.output())
            .await
            .map_err(|_| GitError::Timeout {
                command: command.clone(),
                timeout: limit,
            })?,
        None => cmd.output().await,
    };

    let output = result.map_err(|source| GitError::SpawnFailed {
        command: command.clone(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!("{} exited with {:?}", command, output.status.code());
        return Err(GitError::NonZeroExit {
            command,
            code: output.status.code(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
