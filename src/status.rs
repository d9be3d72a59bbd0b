//! Parsing of `git status --porcelain` (v1) output.
//!
//! Each line has the shape `XY PATH`, where `X` is the index state and `Y` is
//! the worktree state. Paths containing special characters are wrapped in
//! double quotes by git; one surrounding pair is stripped, interior escape
//! sequences are left as git printed them.

use tracing::warn;

use crate::action::CommitAction;

/// Separator git uses between the source and destination of a rename or copy.
const RENAME_SEPARATOR: &str = " -> ";

/// One parsed status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub index_code: char,
    pub worktree_code: char,
    /// Path relative to the repository root, with one pair of quotes stripped.
    pub path: String,
    /// Source path for renames and copies (`ORIG -> PATH`).
    pub original_path: Option<String>,
}

impl StatusEntry {
    /// The action this entry will be committed as.
    pub fn action(&self) -> CommitAction {
        CommitAction::from_codes(self.index_code, self.worktree_code)
    }

    /// The commit message for this entry: `<Action> <basename>`.
    pub fn commit_message(&self) -> String {
        self.action().message_for(&self.path)
    }

    fn is_rename_or_copy(&self) -> bool {
        [self.index_code, self.worktree_code]
            .iter()
            .any(|&c| matches!(c, 'R' | 'C'))
    }
}

/// Whether the status output contains anything to commit.
pub fn has_changes(output: &str) -> bool {
    !output.trim().is_empty()
}

/// Lazily parse status output, skipping blank and malformed lines.
///
/// Lines are yielded in the order git printed them, so callers can act on
/// each entry before the next line is parsed.
pub fn entries(output: &str) -> impl Iterator<Item = StatusEntry> + '_ {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                warn!("Skipping unparsable status line: {:?}", line);
            }
            parsed
        })
}

/// Parse a single porcelain line.
///
/// Returns `None` when the line is too short to carry a path.
pub fn parse_line(line: &str) -> Option<StatusEntry> {
    let mut chars = line.chars();
    let index_code = chars.next()?;
    let worktree_code = chars.next()?;
    chars.next()?;

    let raw_path = chars.as_str().trim_start();
    if raw_path.is_empty() {
        return None;
    }

    let mut entry = StatusEntry {
        index_code,
        worktree_code,
        path: strip_quotes(raw_path).to_string(),
        original_path: None,
    };

    if entry.is_rename_or_copy() {
        if let Some((from, to)) = split_rename(raw_path) {
            entry.original_path = Some(strip_quotes(from).to_string());
            entry.path = strip_quotes(to).to_string();
        }
    }

    Some(entry)
}

/// Split `ORIG -> DEST` into its two sides.
///
/// A quoted source may itself contain ` -> `, so when the text starts with a
/// quote the separator is only accepted right after the closing quote.
fn split_rename(raw: &str) -> Option<(&str, &str)> {
    if !raw.starts_with('"') {
        return raw.split_once(RENAME_SEPARATOR);
    }

    let close = closing_quote(raw)?;
    let (from, rest) = raw.split_at(close + 1);
    rest.strip_prefix(RENAME_SEPARATOR).map(|to| (from, to))
}

/// Byte index of the quote that closes the quoted segment opening `raw`.
fn closing_quote(raw: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, b) in raw.bytes().enumerate().skip(1) {
        match b {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'"' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Strip exactly one pair of surrounding double quotes, if present.
pub fn strip_quotes(path: &str) -> &str {
    if path.len() >= 2 && path.starts_with('"') && path.ends_with('"') {
        &path[1..path.len() - 1]
    } else {
        path
    }
}

/// Final segment of a porcelain path.
///
/// Git always separates with `/`. A trailing slash (untracked directory) is
/// ignored so `build/` yields `build`.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed
        .rsplit_once('/')
        .map_or(trimmed, |(_, name)| name)
}
