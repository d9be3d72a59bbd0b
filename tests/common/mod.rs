//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature, Sort};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository with a committer identity configured.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config
            .set_str("user.name", "Test User")
            .expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("Failed to disable commit signing");

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file (creating parent directories) relative to the repo root.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Remove a file relative to the repo root.
    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.dir.path().join(relative)).expect("Failed to remove file");
    }

    /// Stage the given paths and commit them with git2. Returns the commit OID.
    pub fn commit_paths(&self, paths: &[&str], message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        for path in paths {
            index.add_path(Path::new(path)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Open a fresh handle so state written by the git CLI is re-read.
    fn reopen(&self) -> Repository {
        Repository::open(self.dir.path()).expect("Failed to reopen git repo")
    }

    /// Commit subjects from oldest to newest.
    pub fn commit_subjects(&self) -> Vec<String> {
        let repo = self.reopen();
        let Ok(head) = repo.head() else {
            return Vec::new();
        };
        let head_oid = head.target().expect("HEAD has no target");

        let mut revwalk = repo.revwalk().expect("Failed to create revwalk");
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .expect("Failed to set sorting");
        revwalk.push(head_oid).expect("Failed to push HEAD");

        revwalk
            .map(|oid| {
                let oid = oid.expect("Failed to walk commits");
                let commit = repo.find_commit(oid).expect("Failed to find commit");
                commit.summary().unwrap_or_default().to_string()
            })
            .collect()
    }

    /// Files touched by the HEAD commit, compared with its parent.
    pub fn head_changed_paths(&self) -> Vec<String> {
        let repo = self.reopen();
        let head = repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD commit");
        let tree = head.tree().expect("Failed to get HEAD tree");
        let parent_tree = head.parent(0).ok().map(|p| p.tree().expect("Failed to get parent tree"));

        let diff = repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .expect("Failed to diff trees");

        diff.deltas()
            .filter_map(|d| {
                d.new_file()
                    .path()
                    .or_else(|| d.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect()
    }

    /// Whether the working tree has no changes left, according to git2.
    pub fn is_clean(&self) -> bool {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true);
        self.reopen()
            .statuses(Some(&mut opts))
            .expect("Failed to read statuses")
            .is_empty()
    }
}
