//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;
use crate::shell::is_ci;

use super::{
    prompt_line, NonInteractiveUI, OutputMode, ProgressSpinner, SetupTheme, SpinnerHandle,
    UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: SetupTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: SetupTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn newline(&mut self) {
        writeln!(self.term).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_hint(&mut self, hint: &str) {
        writeln!(self.term, "  {}", self.theme.hint.apply_to(hint)).ok();
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        let b = &self.theme.border;
        writeln!(
            self.term,
            "    {} {}",
            b.apply_to("┌─"),
            b.apply_to("Command ──────────────────────────")
        )
        .ok();
        writeln!(
            self.term,
            "    {} {}",
            b.apply_to("│"),
            self.theme.command.apply_to(command)
        )
        .ok();

        if !output.is_empty() {
            writeln!(
                self.term,
                "    {} {}",
                b.apply_to("├─"),
                b.apply_to("Output ───────────────────────────")
            )
            .ok();
            for line in output.lines() {
                writeln!(self.term, "    {} {}", b.apply_to("│"), line).ok();
            }
        }

        writeln!(
            self.term,
            "    {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }

    fn prompt_line(&mut self, question: &str) -> Result<String> {
        prompt_line(question, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::new(message, self.theme.clone()))
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.term, "{}", self.theme.format_header(title)).ok();
        writeln!(self.term, "{}", self.theme.format_rule()).ok();
    }
}

/// Create the appropriate UI based on context.
///
/// The spinner and dialoguer prompt need a terminal on stdin and stdout, so
/// anything piped or running under CI gets the line-oriented UI.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && !is_ci() && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_verbose_mode() {
        let ui = create_ui(false, OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
