//! Scripted command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every command it is asked to run and answers from a list of
//! rules matched against the rendered command line.
//!
//! # Example
//!
//! ```
//! use image_analysis_setup::shell::{CommandRunner, CommandSpec, MockRunner};
//!
//! let runner = MockRunner::new()
//!     .fail_on("--user transformers", 1)
//!     .missing("exiftool");
//!
//! assert!(runner.check(&CommandSpec::new("python3").arg("--version")));
//! assert!(!runner.check(&CommandSpec::new("exiftool").arg("-ver")));
//! assert_eq!(runner.calls().len(), 2);
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::{Result, SetupError};

use super::{CommandOptions, CommandResult, CommandRunner, CommandSpec};

/// What a matched rule makes the command do.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Exit with the given code and stdout.
    Exit { code: i32, stdout: String },
    /// Fail to spawn, as if the program were not installed.
    Missing,
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    response: MockResponse,
}

/// Command runner that records calls and replays scripted results.
///
/// Rules are checked in insertion order; the first whose pattern is a
/// substring of the rendered command wins. Unmatched commands exit 0 with
/// empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Vec<Rule>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make commands containing `pattern` exit with `code`.
    pub fn fail_on(self, pattern: &str, code: i32) -> Self {
        self.respond(
            pattern,
            MockResponse::Exit {
                code,
                stdout: String::new(),
            },
        )
    }

    /// Make commands containing `pattern` exit 0 and print `stdout`.
    pub fn output_on(self, pattern: &str, stdout: &str) -> Self {
        self.respond(
            pattern,
            MockResponse::Exit {
                code: 0,
                stdout: stdout.to_string(),
            },
        )
    }

    /// Make commands containing `pattern` fail to spawn.
    pub fn missing(self, pattern: &str) -> Self {
        self.respond(pattern, MockResponse::Missing)
    }

    /// Add a rule.
    pub fn respond(mut self, pattern: &str, response: MockResponse) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            response,
        });
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Rendered command lines run so far, in order.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Whether any command line contained `pattern`.
    pub fn was_called(&self, pattern: &str) -> bool {
        self.call_lines().iter().any(|c| c.contains(pattern))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec, _options: CommandOptions) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());
        let line = spec.to_string();

        let response = self
            .rules
            .iter()
            .find(|rule| line.contains(&rule.pattern))
            .map(|rule| rule.response.clone());

        match response {
            None => Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
            Some(MockResponse::Exit { code: 0, stdout }) => {
                Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
            }
            Some(MockResponse::Exit { code, stdout }) => Ok(CommandResult::failure(
                Some(code),
                stdout,
                format!("mock failure for {}", line),
                Duration::ZERO,
            )),
            Some(MockResponse::Missing) => Err(SetupError::SpawnFailed {
                command: line,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No such file or directory",
                ),
            }),
        }
    }
}
