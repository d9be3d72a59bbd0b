//! Commit action derived from porcelain status codes.

use std::fmt;

use serde::Serialize;

use crate::status::basename;

/// The verb used as the first word of a commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommitAction {
    Add,
    Delete,
    Update,
    Create,
}

impl CommitAction {
    /// Derive the action from the index and worktree codes.
    ///
    /// First match wins: untracked (`??`), then `D`, then `M`, then `A` in
    /// either position. Anything else (renames, copies, type changes,
    /// unmerged states) falls back to `Update`.
    pub fn from_codes(index: char, worktree: char) -> Self {
        let either = |code: char| index == code || worktree == code;

        if index == '?' && worktree == '?' {
            CommitAction::Add
        } else if either('D') {
            CommitAction::Delete
        } else if either('M') {
            CommitAction::Update
        } else if either('A') {
            CommitAction::Create
        } else {
            CommitAction::Update
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitAction::Add => "Add",
            CommitAction::Delete => "Delete",
            CommitAction::Update => "Update",
            CommitAction::Create => "Create",
        }
    }

    /// Build the two-word commit message `<Action> <basename(path)>`.
    pub fn message_for(&self, path: &str) -> String {
        format!("{} {}", self.as_str(), basename(path))
    }
}

impl fmt::Display for CommitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
