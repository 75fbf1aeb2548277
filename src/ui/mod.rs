//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commands, display_error, display_file_update,
    display_status, display_success, display_version_change,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Accepts "y" or "yes" (case-insensitive) as confirmation; anything
/// else, including a bare Enter, declines.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} [y/N] ", prompt);
    io::stdout().flush()?;

    read_confirmation(&mut io::stdin().lock())
}

fn read_confirmation<R: BufRead>(input: &mut R) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = line.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
