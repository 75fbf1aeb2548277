//! Pure formatting functions for UI output.
//!
//! Display logic is kept apart from user interaction. The `format_*`
//! functions return strings so they can be tested; the `display_*`
//! functions print them.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::TagVersion;
use crate::updater::FileUpdate;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Describe the move from the current to the new version.
///
/// The new tag is listed separately only when it differs from the bare
/// version, i.e. when the tag carries a prefix.
pub fn format_version_change(current: &TagVersion, next: &TagVersion) -> String {
    let mut out = format!(
        "Current version: {}\nNew version: {}",
        style(current.tag_name()).red(),
        style(&next.version).green().bold()
    );
    if next.tag_name() != next.version.to_string() {
        out.push_str(&format!("\nNew tag: {}", style(next.tag_name()).green()));
    }
    out
}

pub fn display_version_change(current: &TagVersion, next: &TagVersion) {
    println!("{}", format_version_change(current, next));
}

/// Header plus full new contents of a file about to be written.
pub fn format_file_update(update: &FileUpdate) -> String {
    format!(
        "{} {} ({})\n{}",
        style("######### File:").bold(),
        update.path.display(),
        update.kind,
        update.updated.trim_end()
    )
}

pub fn display_file_update(update: &FileUpdate) {
    println!("{}\n", format_file_update(update));
}

/// List of git commands that were (or, in a dry run, would be) executed.
pub fn format_commands(commands: &[String], dry_run: bool) -> String {
    let header = if dry_run {
        "Commands that would run:"
    } else {
        "Commands ran:"
    };

    let mut out = style(header).bold().to_string();
    if commands.is_empty() {
        out.push_str("\n  (none)");
    }
    for command in commands {
        out.push_str(&format!("\n  {}", style(command).cyan()));
    }
    out
}

pub fn display_commands(commands: &[String], dry_run: bool) {
    println!("\n{}", format_commands(commands, dry_run));
}
