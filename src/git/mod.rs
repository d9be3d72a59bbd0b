//! Git invocation: subprocess plumbing, the executor trait and repository
//! root discovery.

pub mod executor;
pub mod subprocess;

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::debug;

pub use executor::{GitCli, GitExecutor, UntrackedFiles};
pub use subprocess::{check_git_installed, get_git_program, get_timeout, run_git};

/// Resolve `dir` to the root of the working tree that contains it.
///
/// Porcelain paths are relative to the repository root, so commands must run
/// there. If no repository is found (or it is bare) `dir` is returned
/// unchanged and the status query reports the problem.
pub fn resolve_workdir(dir: &Path) -> PathBuf {
    match Repository::discover(dir) {
        Ok(repo) => match repo.workdir() {
            Some(workdir) => workdir.to_path_buf(),
            None => {
                debug!("{} is a bare repository", dir.display());
                dir.to_path_buf()
            }
        },
        Err(e) => {
            debug!("No repository found from {}: {}", dir.display(), e);
            dir.to_path_buf()
        }
    }
}
