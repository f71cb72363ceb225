//! Line-oriented UI for piped input and CI.

use std::io::{self, Write};

use crate::error::Result;

use super::theme::SetupTheme;
use super::{read_answer, OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Writes plain lines to stdout, prints spinner messages once instead of
/// animating them, and reads prompt answers as raw lines from stdin so the
/// confirmation can be scripted (`echo y | image-analysis-setup`).
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: SetupTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: SetupTheme::detect(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn newline(&mut self) {
        println!();
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        println!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        println!("{}", self.theme.format_error(msg));
    }

    fn show_hint(&mut self, hint: &str) {
        println!("  {}", hint);
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        println!("    Command: {}", command);
        for line in output.lines() {
            println!("    | {}", line);
        }
    }

    fn prompt_line(&mut self, question: &str) -> Result<String> {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut stdout = io::stdout();
        let answer = read_answer(question, &mut reader, &mut stdout)?;
        // Piped input is not echoed, so end the prompt line ourselves.
        writeln!(stdout)?;
        Ok(answer)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("{}", message);
        Box::new(LineSpinner {
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        println!("{}", self.theme.format_header(title));
        println!("{}", self.theme.format_rule());
    }
}

/// Spinner stand-in that prints only the final status line.
struct LineSpinner {
    theme: SetupTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        println!("{}", self.theme.format_error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_requested_mode() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn spinner_prints_without_animating() {
        let mut ui = NonInteractiveUI::new(OutputMode::Normal);
        let mut spinner = ui.start_spinner("Installing numpy...");
        spinner.set_message("Installing numpy (user directory)...");
        spinner.finish_success("numpy installed successfully (using user directory)");
    }
}
