//! commit-each - commit every changed file in a git working tree as its own commit.
//!
//! # Overview
//!
//! commit-each reads `git status --porcelain`, derives a two-word message
//! (`Add`, `Create`, `Update` or `Delete` followed by the file name) for each
//! listed path, and runs `git add` + `git commit` once per path.

pub mod action;
pub mod committer;
pub mod error;
pub mod git;
pub mod status;

// Re-export commonly used types
pub use action::CommitAction;
pub use committer::{
    CommitConfig, EntryOutcome, OutputMode, RunOptions, RunSummary, StepOutcome, run,
    run_with_executor,
};
pub use error::{GitError, RunError};
pub use git::{GitCli, GitExecutor, UntrackedFiles};
pub use status::StatusEntry;
