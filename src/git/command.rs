//! [Repository] backed by the `git` executable.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{GitBumpError, Result};
use crate::git::Repository;

/// Runs `git` inside a working directory
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Open the repository containing `path`.
    ///
    /// Fails if `path` is not inside a git working tree.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let cli = GitCli {
            workdir: path.as_ref().to_path_buf(),
        };

        let output = cli.output(&["rev-parse", "--is-inside-work-tree"])?;
        if !output.status.success() {
            return Err(GitBumpError::git(format!(
                "Not in a git repository: {}",
                cli.workdir.display()
            )));
        }

        Ok(cli)
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!(workdir = %self.workdir.display(), "git {}", args.join(" "));
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| GitBumpError::git(format!("Failed to run git {}: {}", args[0], e)))
    }

    /// Run a git command that must succeed
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitBumpError::git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a git command whose exit status is the answer
    fn succeeds(&self, args: &[&str]) -> Result<bool> {
        Ok(self.output(args)?.status.success())
    }
}

impl Repository for GitCli {
    fn latest_tag(&self) -> Result<Option<String>> {
        // describe exits non-zero when no tag is reachable (or HEAD is unborn)
        let output = self.output(&["describe", "--tags", "--abbrev=0"])?;
        if !output.status.success() {
            debug!(
                "git describe found no tag: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }

        let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!tag.is_empty()).then_some(tag))
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/tags/{}", name);
        self.succeeds(&["rev-parse", "--verify", "--quiet", &reference])
    }

    fn is_clean(&self) -> Result<bool> {
        let output = self.output(&["diff", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(GitBumpError::git(format!(
                "git diff --quiet failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    fn is_tracked(&self, path: &Path) -> Result<bool> {
        let path = path
            .to_str()
            .ok_or_else(|| GitBumpError::git(format!("Non UTF-8 path: {}", path.display())))?;
        self.succeeds(&["ls-files", "--error-unmatch", "--", path])
    }

    fn add(&self, paths: &[PathBuf]) -> Result<()> {
        let mut args = vec!["add", "--"];
        for path in paths {
            args.push(path.to_str().ok_or_else(|| {
                GitBumpError::git(format!("Non UTF-8 path: {}", path.display()))
            })?);
        }
        self.run(&args).map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.run(&["tag", name])
            .map(|_| ())
            .map_err(|e| GitBumpError::tag(format!("Cannot create tag '{}': {}", name, e)))
    }
}
