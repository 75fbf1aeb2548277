use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met during a bump.
/// These are reported to the user but do not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag is reachable from HEAD; the bump starts from a default
    NoTagsFound { default_version: String },
    /// Working directory has uncommitted changes but --force was given
    DirtyWorkingTreeForced,
    /// Manifest exists but its version pattern matched nothing
    ManifestPatternNotMatched { path: PathBuf, pattern: String },
    /// Updated file is not tracked by git, so it will not be staged
    UntrackedFile { path: PathBuf },
    /// Neither a version file nor a manifest was found
    NoFilesToUpdate,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTagsFound { default_version } => {
                write!(f, "No tags found, starting from {}", default_version)
            }
            BoundaryWarning::DirtyWorkingTreeForced => {
                write!(f, "Working directory is not clean, continuing because of --force")
            }
            BoundaryWarning::ManifestPatternNotMatched { path, pattern } => {
                write!(
                    f,
                    "No version field matching '{}' in {}, skipping",
                    pattern,
                    path.display()
                )
            }
            BoundaryWarning::UntrackedFile { path } => {
                write!(f, "File {} is not tracked by git, skipping add", path.display())
            }
            BoundaryWarning::NoFilesToUpdate => {
                write!(f, "No version file or manifest found to update")
            }
        }
    }
}
