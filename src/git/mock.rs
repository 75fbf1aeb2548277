use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{GitBumpError, Result};
use crate::git::Repository;

/// A mutating git call recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Add(Vec<PathBuf>),
    Commit(String),
    Tag(String),
}

/// Mock repository for testing without running git
pub struct MockRepository {
    latest_tag: Option<String>,
    tags: HashSet<String>,
    clean: bool,
    tracked: HashSet<PathBuf>,
    calls: Mutex<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a clean mock repository with no tags and no tracked files
    pub fn new() -> Self {
        MockRepository {
            latest_tag: None,
            tags: HashSet::new(),
            clean: true,
            tracked: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a tag and make it the latest one
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.tags.insert(name.clone());
        self.latest_tag = Some(name);
        self
    }

    /// Add a tag that is not the latest (e.g. on another branch)
    pub fn with_other_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.insert(name.into());
        self
    }

    pub fn with_dirty_working_tree(mut self) -> Self {
        self.clean = false;
        self
    }

    pub fn with_tracked(mut self, path: impl Into<PathBuf>) -> Self {
        self.tracked.insert(path.into());
        self
    }

    /// Mutating calls made so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: GitCall) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| GitBumpError::git("mock call log poisoned"))?
            .push(call);
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.contains(name))
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn is_tracked(&self, path: &Path) -> Result<bool> {
        Ok(self.tracked.contains(path))
    }

    fn add(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(GitCall::Add(paths.to_vec()))
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(GitCall::Commit(message.to_string()))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(GitCall::Tag(name.to_string()))
    }
}
