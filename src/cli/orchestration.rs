//! Main workflow orchestration logic
//!
//! Keeps the bump workflow apart from CLI argument parsing so it can be
//! driven programmatically (and against a mock repository) without clap.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{bump_version, BumpKind, TagVersion};
use crate::error::{GitBumpError, Result};
use crate::git::Repository;
use crate::ui;
use crate::updater::{apply_update, collect_file_updates, FileUpdate};

/// Arguments for the bump workflow
///
/// Mirrors the CLI flags in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Project root holding the version files and manifests
    pub root: PathBuf,

    pub bump: BumpKind,

    /// Proceed even if the working directory is dirty
    pub force: bool,

    /// Only show what would be done
    pub dry_run: bool,

    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

/// Everything decided before any file or git state is touched
#[derive(Debug, Clone, PartialEq)]
pub struct BumpPlan {
    pub current: TagVersion,
    pub next: TagVersion,
    pub bump: BumpKind,
    pub updates: Vec<FileUpdate>,
    pub warnings: Vec<BoundaryWarning>,
}

impl BumpPlan {
    /// Tag to create, or `None` for pre-release bumps
    pub fn tag_name(&self) -> Option<String> {
        self.bump.is_release().then(|| self.next.tag_name())
    }
}

/// Result of a finished bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub previous: TagVersion,
    pub next: TagVersion,

    /// The tag that was created (or would be, in a dry run)
    pub tag: Option<String>,

    /// Files written (or that would be written)
    pub updated_files: Vec<PathBuf>,

    /// Git commands executed (or that would be executed), in order
    pub commands: Vec<String>,

    pub committed: bool,
    pub tagged: bool,
    pub dry_run: bool,
}

/// Read the latest tag, falling back to `0.0.0` when there is none.
///
/// Returns the parsed tag and, for the fallback, a warning to show.
pub fn resolve_current_version<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
) -> Result<(TagVersion, Option<BoundaryWarning>)> {
    match repo.latest_tag()? {
        Some(tag) => {
            debug!("latest tag: {}", tag);
            Ok((TagVersion::parse(&tag)?, None))
        }
        None => {
            let default = TagVersion::new(
                config.default_tag_prefix.clone(),
                semver::Version::new(0, 0, 0),
            );
            let warning = BoundaryWarning::NoTagsFound {
                default_version: default.tag_name(),
            };
            Ok((default, Some(warning)))
        }
    }
}

/// Work out the next version and the file updates without side effects.
///
/// Fails if the latest tag cannot be parsed, the new tag already exists,
/// or the working directory is dirty and `force` is not set.
pub fn plan_bump<R: Repository + ?Sized>(
    repo: &R,
    args: &BumpWorkflowArgs,
    config: &Config,
) -> Result<BumpPlan> {
    let (current, warning) = resolve_current_version(repo, config)?;
    let mut warnings: Vec<BoundaryWarning> = warning.into_iter().collect();

    let next_version = bump_version(&current.version, args.bump, &config.prerelease_label)?;
    let next = current.with_version(next_version);

    if args.bump.is_release() && repo.tag_exists(&next.tag_name())? {
        return Err(GitBumpError::tag(format!(
            "Tag '{}' already exists",
            next.tag_name()
        )));
    }

    if !repo.is_clean()? {
        if !args.force {
            return Err(GitBumpError::DirtyWorkingTree);
        }
        warnings.push(BoundaryWarning::DirtyWorkingTreeForced);
    }

    let collected = collect_file_updates(&args.root, &next.version, config)?;
    warnings.extend(collected.warnings);

    Ok(BumpPlan {
        current,
        next,
        bump: args.bump,
        updates: collected.updates,
        warnings,
    })
}

/// Main bump workflow
///
/// 1. Plan: resolve current version, bump, check tag and working tree
/// 2. Show the new contents of every file and ask for confirmation
/// 3. Write files, stage tracked ones, commit, tag (release bumps only)
///
/// `confirm` is asked once before anything is written; it is skipped in
/// dry runs and with `assume_yes`. Declining yields
/// [GitBumpError::Cancelled].
pub fn run_bump_workflow<R, C>(
    repo: &R,
    args: &BumpWorkflowArgs,
    config: &Config,
    confirm: C,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    C: FnOnce(&str) -> Result<bool>,
{
    let plan = plan_bump(repo, args, config)?;

    ui::display_version_change(&plan.current, &plan.next);
    for warning in &plan.warnings {
        ui::display_boundary_warning(warning);
    }
    for update in &plan.updates {
        ui::display_file_update(update);
    }

    if !args.dry_run && !args.assume_yes {
        let prompt = if plan.bump.is_release() {
            "Proceed with changes and tagging?"
        } else {
            "Tagging won't be done because of --pre. Proceed with changes?"
        };
        if !confirm(prompt)? {
            return Err(GitBumpError::Cancelled);
        }
    }

    execute_plan(repo, args, config, plan)
}

fn execute_plan<R: Repository + ?Sized>(
    repo: &R,
    args: &BumpWorkflowArgs,
    config: &Config,
    plan: BumpPlan,
) -> Result<WorkflowResult> {
    let verb = if args.dry_run { "Would update" } else { "Updating" };
    let mut written: Vec<PathBuf> = Vec::new();

    for update in &plan.updates {
        ui::display_status(&format!("{} {}", verb, update.path.display()));
        if !args.dry_run {
            apply_update(&args.root, update).map_err(|e| with_written_files(e, &written))?;
            written.push(update.path.clone());
        }
    }

    let mut to_stage = Vec::new();
    if plan.bump.is_release() {
        for update in &plan.updates {
            if repo.is_tracked(&update.path)? {
                to_stage.push(update.path.clone());
            } else {
                ui::display_boundary_warning(&BoundaryWarning::UntrackedFile {
                    path: update.path.clone(),
                });
            }
        }
    }

    let mut commands = Vec::new();
    let mut committed = false;
    let mut tagged = false;
    let tag = plan.tag_name();

    if !to_stage.is_empty() {
        let files: Vec<String> = to_stage.iter().map(|p| p.display().to_string()).collect();
        commands.push(format!("git add -- {}", files.join(" ")));

        let message = config.render_commit_message(
            &plan.next.version.to_string(),
            &plan.next.tag_name(),
        );
        commands.push(format!("git commit -m \"{}\"", message));

        if !args.dry_run {
            repo.add(&to_stage)?;
            ui::display_success(&format!("Staged {}", files.join(", ")));
            repo.commit(&message)?;
            ui::display_success(&format!("Committed: {}", message));
            committed = true;
        }
    }

    match &tag {
        Some(name) => {
            commands.push(format!("git tag {}", name));
            if !args.dry_run {
                repo.create_tag(name)?;
                ui::display_success(&format!("Created tag: {}", name));
                tagged = true;
            }
        }
        None => ui::display_status("Pre-release version, not committing or tagging"),
    }

    info!(
        version = %plan.next.version,
        dry_run = args.dry_run,
        committed,
        tagged,
        "bump finished"
    );

    Ok(WorkflowResult {
        previous: plan.current,
        next: plan.next,
        tag,
        updated_files: plan.updates.into_iter().map(|u| u.path).collect(),
        commands,
        committed,
        tagged,
        dry_run: args.dry_run,
    })
}

/// Name the files already rewritten when a later write fails
fn with_written_files(err: GitBumpError, written: &[PathBuf]) -> GitBumpError {
    match err {
        GitBumpError::FileUpdate { path, reason } if !written.is_empty() => {
            let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            GitBumpError::FileUpdate {
                path,
                reason: format!("{} (already updated: {})", reason, files.join(", ")),
            }
        }
        other => other,
    }
}
