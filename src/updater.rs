//! Discovers version files and manifests and computes their new contents.
//!
//! Nothing here touches git. Updates are computed first so they can be
//! shown (or only shown, in a dry run) before [apply_update] writes them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use regex::{NoExpand, Regex};
use semver::Version;
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::error::{GitBumpError, Result};

/// What kind of file an update targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Plain file holding only the version
    VersionFile,
    /// Project manifest with a version field
    Manifest,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::VersionFile => write!(f, "version file"),
            FileKind::Manifest => write!(f, "manifest"),
        }
    }
}

/// A pending rewrite of one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpdate {
    /// Path relative to the project root
    pub path: PathBuf,
    pub kind: FileKind,
    pub original: String,
    pub updated: String,
}

/// Updates found under a project root, plus anything worth warning about
#[derive(Debug, Default)]
pub struct CollectedUpdates {
    pub updates: Vec<FileUpdate>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Compute the new contents of every version file and manifest under `root`.
///
/// Version files are found recursively by name, honouring `.gitignore`
/// and skipping hidden directories. Manifests are looked up at their
/// configured path; a missing `required` manifest is an error.
pub fn collect_file_updates(
    root: &Path,
    new_version: &Version,
    config: &Config,
) -> Result<CollectedUpdates> {
    let mut collected = CollectedUpdates::default();

    for path in find_version_files(root, &config.version_file)? {
        let original = read_file(root, &path)?;
        let updated = render_version_file(&original, new_version);
        if updated != original {
            collected.updates.push(FileUpdate {
                path,
                kind: FileKind::VersionFile,
                original,
                updated,
            });
        }
    }

    for manifest in &config.manifests {
        let path = PathBuf::from(&manifest.path);
        if collected.updates.iter().any(|u| u.path == path) {
            continue;
        }

        if !root.join(&path).is_file() {
            if manifest.required {
                return Err(GitBumpError::MissingFile(path));
            }
            debug!("manifest {} not present", path.display());
            continue;
        }

        let original = read_file(root, &path)?;
        let regex = manifest.regex()?;
        match render_manifest(&original, &regex, &manifest.replacement, new_version) {
            Some(updated) if updated != original => collected.updates.push(FileUpdate {
                path,
                kind: FileKind::Manifest,
                original,
                updated,
            }),
            Some(_) => debug!("{} already at {}", path.display(), new_version),
            None => collected
                .warnings
                .push(BoundaryWarning::ManifestPatternNotMatched {
                    path,
                    pattern: manifest.pattern.clone(),
                }),
        }
    }

    if collected.updates.is_empty() && collected.warnings.is_empty() {
        collected.warnings.push(BoundaryWarning::NoFilesToUpdate);
    }

    Ok(collected)
}

/// Find files named `file_name` under `root`, as sorted relative paths.
pub fn find_version_files(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkBuilder::new(root).git_ignore(true).build() {
        let entry = entry?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file || entry.file_name() != file_name {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();
        found.push(relative);
    }

    found.sort();
    Ok(found)
}

/// New contents of a plain version file.
///
/// The file holds only the version; a trailing newline is preserved.
pub fn render_version_file(original: &str, version: &Version) -> String {
    if original.ends_with('\n') {
        format!("{}\n", version)
    } else {
        version.to_string()
    }
}

/// New contents of a manifest, or `None` if `pattern` does not match.
///
/// Only the first match is replaced, so dependency versions further
/// down the file are left alone.
pub fn render_manifest(
    original: &str,
    pattern: &Regex,
    replacement: &str,
    version: &Version,
) -> Option<String> {
    if !pattern.is_match(original) {
        return None;
    }

    let replacement = replacement.replace("{version}", &version.to_string());
    Some(
        pattern
            .replacen(original, 1, NoExpand(&replacement))
            .into_owned(),
    )
}

/// Write an update to disk
pub fn apply_update(root: &Path, update: &FileUpdate) -> Result<()> {
    let full_path = root.join(&update.path);
    debug!("writing {}", full_path.display());
    fs::write(&full_path, &update.updated)
        .map_err(|e| GitBumpError::file_update(&update.path, format!("Failed to write: {}", e)))
}

fn read_file(root: &Path, path: &Path) -> Result<String> {
    fs::read_to_string(root.join(path))
        .map_err(|e| GitBumpError::file_update(path, format!("Failed to read: {}", e)))
}
