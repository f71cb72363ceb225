//! Confirmation before anything is installed.

use crate::config::Package;
use crate::error::{Result, SetupError};
use crate::ui::UserInterface;

/// Question asked before installing.
pub const QUESTION: &str = "Do you want to proceed? (y/N)";

/// Answers that allow the installation to go ahead.
pub const AFFIRMATIVE: &[&str] = &["y", "yes"];

/// Whether `answer` (trimmed, case-insensitive) is an affirmative token.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Show what will be installed and ask the operator to confirm.
///
/// Returns [`SetupError::Cancelled`] for any answer other than yes,
/// including end of input.
pub fn confirm_installation(ui: &mut dyn UserInterface, packages: &[Package]) -> Result<()> {
    ui.newline();
    ui.message("Packages to be installed:");
    for package in packages {
        ui.message(&format!("- {}", package));
    }
    ui.newline();

    let answer = ui.prompt_line(QUESTION)?;
    tracing::debug!(answer = %answer, "confirmation answer");

    if is_affirmative(&answer) {
        Ok(())
    } else {
        Err(SetupError::Cancelled)
    }
}
