use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum GitBumpError {
    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Working directory is not clean, commit changes before proceeding or use --force")]
    DirtyWorkingTree,

    #[error("Required file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to update {}: {reason}", path.display())]
    FileUpdate { path: PathBuf, reason: String },

    #[error("Aborted by user request")]
    Cancelled,

    #[error("File discovery failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, GitBumpError>;

impl GitBumpError {
    /// Create a git error with context
    pub fn git(msg: impl Into<String>) -> Self {
        GitBumpError::Git(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitBumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitBumpError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitBumpError::Tag(msg.into())
    }

    /// Create a file update error for `path`
    pub fn file_update(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        GitBumpError::FileUpdate {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
