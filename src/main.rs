//! commit-each - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use commit_each::git::{get_git_program, get_timeout};
use commit_each::{CommitConfig, OutputMode, RunSummary, UntrackedFiles, run};

/// Commit every changed file as its own commit.
#[derive(Parser, Debug)]
#[command(name = "commit-each")]
#[command(about = "Commit every changed file in a git working tree as its own commit")]
#[command(version)]
struct Cli {
    /// Directory inside the repository to operate on
    #[arg(short = 'C', long, default_value = ".")]
    repo: PathBuf,

    /// Print what would be committed without staging or committing
    #[arg(long)]
    dry_run: bool,

    /// How untracked files are listed (normal lists untracked directories as one entry)
    #[arg(long, value_enum, default_value_t = UntrackedArg::Normal)]
    untracked: UntrackedArg,

    /// Git executable to run (defaults to $COMMIT_EACH_GIT, then `git`)
    #[arg(long)]
    git: Option<PathBuf>,

    /// Print a JSON report instead of progress lines
    #[arg(long)]
    json: bool,

    /// Exit with a non-zero status if any git command failed
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum UntrackedArg {
    Normal,
    All,
    No,
}

impl From<UntrackedArg> for UntrackedFiles {
    fn from(arg: UntrackedArg) -> Self {
        match arg {
            UntrackedArg::Normal => UntrackedFiles::Normal,
            UntrackedArg::All => UntrackedFiles::All,
            UntrackedArg::No => UntrackedFiles::No,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CommitConfig {
        workdir: cli.repo.clone(),
        git_program: cli.git.clone().unwrap_or_else(get_git_program),
        untracked: cli.untracked.into(),
        timeout: get_timeout(),
        dry_run: cli.dry_run,
        output: if cli.json {
            OutputMode::Quiet
        } else {
            OutputMode::Human
        },
    };

    let failed = match run(&config).await {
        Ok(summary) => {
            if cli.json {
                print_json(&report(&summary))?;
            } else if !summary.is_empty() {
                println!("{}", summary);
            }
            summary.has_failures()
        }
        Err(e) => {
            // The error line itself was already printed in human mode.
            if cli.json {
                print_json(&json!({ "error": e.to_string() }))?;
            }
            true
        }
    };

    if failed && cli.strict {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Set up stderr logging. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(summary: &RunSummary) -> serde_json::Value {
    json!({
        "dry_run": summary.dry_run,
        "total": summary.total(),
        "committed": summary.committed(),
        "failed": summary.failed(),
        "entries": summary.entries,
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", rendered);
    Ok(())
}
