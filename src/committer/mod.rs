//! Commit pipeline: query status, then stage and commit each entry on its own.

pub mod summary;

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{GitError, RunError};
use crate::git::{GitCli, GitExecutor, UntrackedFiles, resolve_workdir};
use crate::status::{StatusEntry, entries, has_changes};

pub use summary::{EntryOutcome, RunSummary, StepOutcome};

/// Printed when the status listing is empty.
pub const NO_CHANGES_MESSAGE: &str = "No changes found.";

/// Where progress lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress and error lines on stdout.
    #[default]
    Human,
    /// Progress and error lines only in the log; the caller prints a report.
    Quiet,
}

/// Options that shape a single run, independent of how git is invoked.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub output: OutputMode,
}

/// Configuration for a run against the real git CLI, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct CommitConfig {
    pub workdir: PathBuf,
    pub git_program: PathBuf,
    pub untracked: UntrackedFiles,
    pub timeout: Option<Duration>,
    pub dry_run: bool,
    pub output: OutputMode,
}

impl CommitConfig {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            output: self.output,
        }
    }
}

struct Reporter {
    mode: OutputMode,
}

impl Reporter {
    fn progress(&self, line: &str) {
        match self.mode {
            OutputMode::Human => println!("{}", line),
            OutputMode::Quiet => info!("{}", line),
        }
    }

    fn error(&self, err: &GitError) {
        match self.mode {
            OutputMode::Human => println!("{}", err),
            OutputMode::Quiet => warn!("{}", err),
        }
    }
}

/// Run the pipeline with the system git inside `config.workdir`.
pub async fn run(config: &CommitConfig) -> Result<RunSummary, RunError> {
    let workdir = resolve_workdir(&config.workdir);
    debug!("Using working tree {}", workdir.display());

    let git = GitCli::new(&config.git_program, workdir)
        .with_untracked(config.untracked)
        .with_timeout(config.timeout);

    if let Err(e) = git.check_installed() {
        Reporter { mode: config.output }.error(&e);
        return Err(RunError::StatusFailed(e));
    }

    run_with_executor(&git, &config.options()).await
}

/// Run the pipeline with any executor.
///
/// Steps:
/// 1. Query status; a failure here ends the run before anything is staged.
/// 2. Empty status: report no changes and return an empty summary.
/// 3. For each entry in listing order: stage its path, then commit with
///    `<Action> <basename>`. Step failures are reported and recorded, and
///    the loop moves on.
pub async fn run_with_executor<E: GitExecutor>(
    executor: &E,
    options: &RunOptions,
) -> Result<RunSummary, RunError> {
    let reporter = Reporter {
        mode: options.output,
    };

    let status = match executor.status().await {
        Ok(status) => status,
        Err(e) => {
            reporter.error(&e);
            return Err(RunError::StatusFailed(e));
        }
    };

    let mut summary = RunSummary::new(options.dry_run);

    if !has_changes(&status) {
        reporter.progress(NO_CHANGES_MESSAGE);
        return Ok(summary);
    }

    for entry in entries(&status) {
        let outcome = commit_entry(executor, entry, options, &reporter).await;
        summary.entries.push(outcome);
    }

    debug!(
        "Run finished: {} entries, {} committed, {} failed",
        summary.total(),
        summary.committed(),
        summary.failed()
    );

    Ok(summary)
}

async fn commit_entry<E: GitExecutor>(
    executor: &E,
    entry: StatusEntry,
    options: &RunOptions,
    reporter: &Reporter,
) -> EntryOutcome {
    let action = entry.action();
    let message = entry.commit_message();

    let (stage, commit) = if options.dry_run {
        reporter.progress(&format!(
            "Would commit {} with message: '{}'",
            entry.path, message
        ));
        (StepOutcome::Skipped, StepOutcome::Skipped)
    } else {
        reporter.progress(&format!(
            "Committing {} with message: '{}'",
            entry.path, message
        ));
        // The commit is attempted even when staging failed.
        let stage = record(executor.stage(&entry.path).await, reporter);
        let commit = record(executor.commit(&message).await, reporter);
        (stage, commit)
    };

    EntryOutcome {
        path: entry.path,
        original_path: entry.original_path,
        action,
        message,
        stage,
        commit,
    }
}

fn record(result: Result<String, GitError>, reporter: &Reporter) -> StepOutcome {
    match result {
        Ok(_) => StepOutcome::Ok,
        Err(e) => {
            reporter.error(&e);
            StepOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
