//! Git operations abstraction layer
//!
//! The [Repository] trait lists the handful of git operations a version
//! bump needs. Two implementations exist:
//!
//! - [command::GitCli]: shells out to the system `git` binary, inheriting
//!   the user's git config, hooks and signing setup
//! - [mock::MockRepository]: records calls in memory for tests
//!
//! Workflow code depends on the trait so it can run against the mock.

pub mod command;
pub mod mock;

pub use command::GitCli;
pub use mock::MockRepository;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Git operations used by the bump workflow
///
/// Paths are relative to the repository working directory the
/// implementation was opened on.
pub trait Repository {
    /// Most recent tag reachable from HEAD, or `None` when there is none
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Whether a tag with exactly this name exists
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Whether tracked files have no unstaged modifications
    ///
    /// Untracked files do not make the working directory dirty.
    fn is_clean(&self) -> Result<bool>;

    /// Whether `path` is tracked by git
    fn is_tracked(&self, path: &Path) -> Result<bool>;

    /// Stage the given files
    fn add(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commit the staged changes with `message`
    fn commit(&self, message: &str) -> Result<()>;

    /// Create a lightweight tag on HEAD
    fn create_tag(&self, name: &str) -> Result<()>;
}
