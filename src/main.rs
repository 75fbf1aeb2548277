use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use git_bump::cli::{resolve_current_version, run_bump_workflow, BumpWorkflowArgs};
use git_bump::config;
use git_bump::domain::BumpKind;
use git_bump::git::GitCli;
use git_bump::{ui, GitBumpError};

#[derive(clap::Parser)]
#[command(
    name = "git-bump",
    version,
    about = "Bump the semantic version, update version files, commit and tag"
)]
#[command(group(ArgGroup::new("bump").args(["major", "minor", "patch", "pre"])))]
struct Args {
    #[arg(long, help = "Bump major version")]
    major: bool,

    #[arg(long, help = "Bump minor version")]
    minor: bool,

    #[arg(long, help = "Bump patch version")]
    patch: bool,

    #[arg(
        long,
        help = "Create a pre-release version. Changes will NOT be committed or tagged"
    )]
    pre: bool,

    #[arg(
        long,
        help = "Force the modifications even if working directory is not clean"
    )]
    force: bool,

    #[arg(
        long,
        help = "Dry run. Do not modify anything, just show what would be done"
    )]
    dry: bool,

    #[arg(short, long, help = "Skip the confirmation prompt")]
    yes: bool,

    #[arg(long, conflicts_with = "bump", help = "Print the current version and exit")]
    current: bool,

    #[arg(short = 'C', long, help = "Project directory (defaults to the current directory)")]
    directory: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

impl Args {
    fn bump_kind(&self) -> Option<BumpKind> {
        if self.major {
            Some(BumpKind::Major)
        } else if self.minor {
            Some(BumpKind::Minor)
        } else if self.patch {
            Some(BumpKind::Patch)
        } else if self.pre {
            Some(BumpKind::Pre)
        } else {
            None
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let root = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let config = match config::load_config(args.config.as_deref(), &root) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match GitCli::open(&root) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.current {
        match resolve_current_version(&repo, &config) {
            Ok((current, warning)) => {
                if let Some(warning) = warning {
                    ui::display_boundary_warning(&warning);
                }
                println!("{}", current);
                return Ok(());
            }
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        }
    }

    let Some(bump) = args.bump_kind() else {
        ui::display_status("No version bump requested, consider --major, --minor, --patch or --pre");
        return Ok(());
    };

    let workflow_args = BumpWorkflowArgs {
        root,
        bump,
        force: args.force,
        dry_run: args.dry,
        assume_yes: args.yes,
    };

    match run_bump_workflow(&repo, &workflow_args, &config, ui::confirm_action) {
        Ok(result) => {
            ui::display_commands(&result.commands, result.dry_run);
            if result.dry_run {
                ui::display_success("Dry run complete, nothing was changed");
            } else {
                ui::display_success("All done!");
            }
            Ok(())
        }
        Err(GitBumpError::Cancelled) => {
            println!("Aborted by user request");
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
