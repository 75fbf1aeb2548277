use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use semver::Prerelease;
use serde::{Deserialize, Serialize};

use crate::error::{GitBumpError, Result};

/// File name looked up in the project root and the user config directory
pub const CONFIG_FILE_NAME: &str = "gitbump.toml";

/// Represents the complete configuration for git-bump.
///
/// Controls which files get the new version, how the pre-release label
/// and commit message look, and the tag prefix used when no tag exists.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Name of the plain version files, searched for recursively
    #[serde(default = "default_version_file")]
    pub version_file: String,

    #[serde(default = "default_prerelease_label")]
    pub prerelease_label: String,

    /// Commit message template; `{version}` and `{tag}` are substituted
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Prefix for the first tag of a repository without tags
    #[serde(default)]
    pub default_tag_prefix: String,

    #[serde(default = "default_manifests")]
    pub manifests: Vec<ManifestConfig>,
}

/// A manifest whose version field is located by regex.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    /// Path relative to the project root
    pub path: String,

    /// Regex locating the version field; the first match is replaced
    pub pattern: String,

    /// Text replacing the match; `{version}` is substituted
    pub replacement: String,

    /// Abort when the manifest does not exist
    #[serde(default)]
    pub required: bool,
}

impl ManifestConfig {
    pub fn regex(&self) -> Result<Regex> {
        Regex::new(&self.pattern).map_err(|e| {
            GitBumpError::config(format!(
                "Invalid pattern for manifest '{}': {}",
                self.path, e
            ))
        })
    }
}

fn default_version_file() -> String {
    "version.txt".to_string()
}

fn default_prerelease_label() -> String {
    "dev".to_string()
}

fn default_commit_message() -> String {
    "Bump version to {version}".to_string()
}

/// Only a bare `version` key at the start of a line, so `rust-version`,
/// `python_version` and inline dependency tables are left alone.
const TOML_VERSION_PATTERN: &str = r#"(?m)^version\s*=\s*"\d+[^"]*""#;
const TOML_VERSION_REPLACEMENT: &str = r#"version = "{version}""#;

/// Returns the default manifests: pyproject.toml, Cargo.toml and package.json.
fn default_manifests() -> Vec<ManifestConfig> {
    vec![
        ManifestConfig {
            path: "pyproject.toml".to_string(),
            pattern: TOML_VERSION_PATTERN.to_string(),
            replacement: TOML_VERSION_REPLACEMENT.to_string(),
            required: false,
        },
        ManifestConfig {
            path: "Cargo.toml".to_string(),
            pattern: TOML_VERSION_PATTERN.to_string(),
            replacement: TOML_VERSION_REPLACEMENT.to_string(),
            required: false,
        },
        ManifestConfig {
            path: "package.json".to_string(),
            pattern: r#""version"\s*:\s*"\d+[^"]*""#.to_string(),
            replacement: r#""version": "{version}""#.to_string(),
            required: false,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: default_version_file(),
            prerelease_label: default_prerelease_label(),
            commit_message: default_commit_message(),
            default_tag_prefix: String::new(),
            manifests: default_manifests(),
        }
    }
}

impl Config {
    /// Check values that serde cannot: regexes and the pre-release label
    pub fn validate(&self) -> Result<()> {
        if self.version_file.trim().is_empty() {
            return Err(GitBumpError::config("version_file must not be empty"));
        }

        Prerelease::new(&self.prerelease_label).map_err(|e| {
            GitBumpError::config(format!(
                "Invalid prerelease_label '{}': {}",
                self.prerelease_label, e
            ))
        })?;
        if self.prerelease_label.is_empty() {
            return Err(GitBumpError::config("prerelease_label must not be empty"));
        }

        if !matches!(self.default_tag_prefix.as_str(), "" | "v" | "V") {
            return Err(GitBumpError::config(format!(
                "default_tag_prefix must be \"\", \"v\" or \"V\", got '{}'",
                self.default_tag_prefix
            )));
        }

        for manifest in &self.manifests {
            manifest.regex()?;
        }

        Ok(())
    }

    /// Render the commit message for a new version and tag
    pub fn render_commit_message(&self, version: &str, tag: &str) -> String {
        self.commit_message
            .replace("{version}", version)
            .replace("{tag}", tag)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in the project root
/// 3. `gitbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(root),
    };

    let config = match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = fs::read_to_string(&path).map_err(|e| {
                GitBumpError::config(format!("Cannot read {}: {}", path.display(), e))
            })?;
            toml::from_str(&content).map_err(|e| {
                GitBumpError::config(format!("Cannot parse {}: {}", path.display(), e))
            })?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    let local = root.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
