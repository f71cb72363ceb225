//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt answers.
//!
//! # Example
//!
//! ```
//! use image_analysis_setup::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.queue_answers(vec!["y"]);
//!
//! // Use ui in code under test...
//! ui.message("Installing torch...");
//! ui.success("torch installed successfully (using user directory)");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Installing torch"));
//! assert!(ui.has_success("torch installed"));
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::Result;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Every call is also appended to a single ordered transcript so tests can
/// assert on the sequence of output, not only on its presence.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    spinners: Vec<String>,
    error_blocks: Vec<(String, String)>,
    prompts_shown: Vec<String>,
    answers: VecDeque<String>,
    transcript: Rc<RefCell<Vec<String>>>,
    spinner_results: Rc<RefCell<Vec<(SpinnerStatus, String)>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Queue answers returned by successive `prompt_line` calls.
    ///
    /// Once the queue is exhausted, prompts read as end of input (empty).
    pub fn queue_answers(&mut self, answers: Vec<&str>) {
        self.answers.extend(answers.into_iter().map(String::from));
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured hint lines.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all captured error blocks as (command, output).
    pub fn error_blocks(&self) -> &[(String, String)] {
        &self.error_blocks
    }

    /// Get all prompt questions that were shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown, directly or by a spinner.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self.spinner_has(SpinnerStatus::Success, msg)
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown, directly or by a spinner.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg)) || self.spinner_has(SpinnerStatus::Error, msg)
    }

    /// Check if a specific hint was shown.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    /// Whether both were shown and `first` came before `second`.
    pub fn shown_before(&self, first: &str, second: &str) -> bool {
        match (self.position_of(first), self.position_of(second)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }

    fn position_of(&self, needle: &str) -> Option<usize> {
        self.transcript
            .borrow()
            .iter()
            .position(|line| line.contains(needle))
    }

    fn spinner_has(&self, status: SpinnerStatus, msg: &str) -> bool {
        self.spinner_results
            .borrow()
            .iter()
            .any(|(s, m)| *s == status && m.contains(msg))
    }

    fn record(&mut self, line: String) {
        self.transcript.borrow_mut().push(line);
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        self.record(msg.to_string());
    }

    fn newline(&mut self) {
        self.record(String::new());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
        self.record(format!("✓ {}", msg));
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
        self.record(format!("! {}", msg));
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
        self.record(format!("✗ {}", msg));
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
        self.record(format!("  {}", hint));
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        self.error_blocks
            .push((command.to_string(), output.to_string()));
        self.record(format!("Command: {}", command));
    }

    fn prompt_line(&mut self, question: &str) -> Result<String> {
        self.prompts_shown.push(question.to_string());
        self.record(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        self.record(message.to_string());
        Box::new(MockSpinner {
            sink: Some(SpinnerSink {
                transcript: Rc::clone(&self.transcript),
                results: Rc::clone(&self.spinner_results),
            }),
            ..MockSpinner::default()
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
        self.record(title.to_string());
    }
}

/// Mock spinner that captures finish messages.
///
/// Spinners started from a [`MockUI`] also report their finish line back to
/// that UI's transcript.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
    sink: Option<SpinnerSink>,
}

#[derive(Debug)]
struct SpinnerSink {
    transcript: Rc<RefCell<Vec<String>>>,
    results: Rc<RefCell<Vec<(SpinnerStatus, String)>>>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get how the spinner finished.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(status);
        if let Some(sink) = &self.sink {
            let icon = match status {
                SpinnerStatus::Success => "✓",
                SpinnerStatus::Error => "✗",
            };
            sink.transcript
                .borrow_mut()
                .push(format!("{} {}", icon, msg));
            sink.results.borrow_mut().push((status, msg.to_string()));
        }
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }
}
