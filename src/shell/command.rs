//! External command execution.
//!
//! Commands are always spawned from a program plus a discrete argument
//! vector. Nothing is interpolated into a shell string, so package names and
//! interpreter paths are passed to the child exactly as given.

use crate::error::{Result, SetupError};
use std::fmt;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    /// Create a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments passed to the program.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Captured stdout followed by captured stderr, trimmed.
    ///
    /// Python 2 and some 3.x builds print `--version` to stderr, so version
    /// parsing looks at both streams.
    pub fn combined_output(&self) -> String {
        let mut out = String::new();
        for part in [self.stdout.trim(), self.stderr.trim()] {
            if part.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(part);
        }
        out
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Capture both streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
        }
    }

    /// Let the child write straight to the terminal.
    pub fn inherited() -> Self {
        Self::default()
    }
}

/// Seam for running external commands.
///
/// The setup steps take a `&dyn CommandRunner` so tests can script exit
/// codes without touching the host system.
pub trait CommandRunner {
    /// Run `spec` to completion.
    ///
    /// Returns `Err` only when the command could not be started; a non-zero
    /// exit is reported through [`CommandResult::success`].
    fn run(&self, spec: &CommandSpec, options: CommandOptions) -> Result<CommandResult>;

    /// Run `spec` silently and report whether it exited zero.
    fn check(&self, spec: &CommandSpec) -> bool {
        self.run(spec, CommandOptions::captured())
            .map(|r| r.success)
            .unwrap_or(false)
    }
}

/// Runs commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec, options: CommandOptions) -> Result<CommandResult> {
        execute(spec, options)
    }
}

/// Execute a command, blocking until it exits.
pub fn execute(spec: &CommandSpec, options: CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!(command = %spec, "running command");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    cmd.stdin(Stdio::null());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|source| {
        tracing::debug!(command = %spec, error = %source, "failed to spawn command");
        SetupError::SpawnFailed {
            command: spec.to_string(),
            source,
        }
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    tracing::debug!(
        command = %spec,
        exit_code = ?output.status.code(),
        duration_ms = duration.as_millis() as u64,
        "command finished"
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_display_joins_program_and_args() {
        let spec = CommandSpec::new("python3")
            .args(["-m", "pip", "install"])
            .arg("--user")
            .arg("torch");
        assert_eq!(spec.to_string(), "python3 -m pip install --user torch");
        assert_eq!(spec.program(), "python3");
        assert_eq!(spec.arguments().len(), 5);
    }

    #[test]
    fn combined_output_merges_streams() {
        let result = CommandResult::success(
            "out\n".to_string(),
            "  err \n".to_string(),
            Duration::ZERO,
        );
        assert_eq!(result.combined_output(), "out\nerr");
    }

    #[test]
    fn combined_output_skips_empty_streams() {
        let result = CommandResult::failure(
            Some(1),
            String::new(),
            "Python 2.7.18\n".to_string(),
            Duration::ZERO,
        );
        assert_eq!(result.combined_output(), "Python 2.7.18");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let spec = CommandSpec::new("definitely-not-a-real-program-3f9a").arg("--version");
        let err = SystemRunner
            .run(&spec, CommandOptions::captured())
            .unwrap_err();
        assert!(matches!(err, SetupError::SpawnFailed { .. }));
        assert!(!SystemRunner.check(&spec));
    }

    #[cfg(unix)]
    #[test]
    fn execute_successful_command() {
        let spec = CommandSpec::new("sh").args(["-c", "echo hello"]);
        let result = execute(&spec, CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_failing_command() {
        let spec = CommandSpec::new("sh").args(["-c", "exit 3"]);
        let result = execute(&spec, CommandOptions::captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn arguments_are_not_shell_interpreted() {
        let spec = CommandSpec::new("echo").arg("torch; echo injected");
        let result = execute(&spec, CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.stdout.trim(), "torch; echo injected");
    }

    #[cfg(unix)]
    #[test]
    fn check_reports_exit_status() {
        assert!(SystemRunner.check(&CommandSpec::new("true")));
        assert!(!SystemRunner.check(&CommandSpec::new("false")));
    }

    #[cfg(unix)]
    #[test]
    fn command_result_tracks_duration() {
        let result = execute(
            &CommandSpec::new("echo").arg("fast"),
            CommandOptions::captured(),
        )
        .unwrap();
        assert!(result.duration.as_millis() < 5000);
    }
}
