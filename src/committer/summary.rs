//! Per-entry and per-run results.

use std::fmt;

use serde::Serialize;

use crate::action::CommitAction;

/// Result of one git step for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Ok,
    Failed { error: String },
    /// Not executed (dry run).
    Skipped,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, StepOutcome::Ok)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

/// What happened to one status entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    pub action: CommitAction,
    pub message: String,
    pub stage: StepOutcome,
    pub commit: StepOutcome,
}

impl EntryOutcome {
    /// Both the stage and the commit step ran and succeeded.
    pub fn succeeded(&self) -> bool {
        self.stage.is_ok() && self.commit.is_ok()
    }

    pub fn failed(&self) -> bool {
        self.stage.is_failed() || self.commit.is_failed()
    }
}

/// Aggregate result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    pub entries: Vec<EntryOutcome>,
}

impl RunSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            entries: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Entries whose stage and commit both succeeded.
    ///
    /// Disjoint from `failed()`, so the two never exceed `total()`.
    pub fn committed(&self) -> usize {
        self.entries.iter().filter(|e| e.succeeded()).count()
    }

    /// Entries where at least one step failed.
    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(EntryOutcome::failed)
    }

    /// True when the status listing had nothing to commit.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            return write!(f, "Would commit {} file(s)", self.total());
        }

        write!(f, "Committed {} of {} file(s)", self.committed(), self.total())?;
        let failed = self.failed();
        if failed > 0 {
            write!(f, ", {} failed", failed)?;
        }
        Ok(())
    }
}
