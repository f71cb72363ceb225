//! Interpreter discovery and availability check.

use regex::Regex;

use crate::error::{Result, SetupError};
use crate::shell::{CommandOptions, CommandRunner, CommandSpec};

/// Preferred interpreter command.
pub const VERSIONED_COMMAND: &str = "python3";
/// Interpreter command tried when the versioned one is absent.
pub const GENERIC_COMMAND: &str = "python";

/// How the interpreter was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterSource {
    Versioned,
    Generic,
    Fallback,
}

/// The interpreter that runs `pip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    command: String,
    source: InterpreterSource,
}

impl Interpreter {
    /// The command used to invoke the interpreter.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// How the interpreter was chosen.
    pub fn source(&self) -> InterpreterSource {
        self.source
    }

    /// `<python> --version`
    pub fn version_command(&self) -> CommandSpec {
        CommandSpec::new(&self.command).arg("--version")
    }

    /// `<python> -m pip install <flag> <package>`
    pub fn pip_install(&self, flag: &str, package: &str) -> CommandSpec {
        CommandSpec::new(&self.command)
            .args(["-m", "pip", "install"])
            .arg(flag)
            .arg(package)
    }
}

/// Pick the interpreter using `is_available` to test each candidate.
///
/// Prefers `python3`, then `python`, then `fallback`. Always returns a value.
pub fn resolve_with<F>(is_available: F, fallback: &str) -> Interpreter
where
    F: Fn(&str) -> bool,
{
    let interpreter = if is_available(VERSIONED_COMMAND) {
        Interpreter {
            command: VERSIONED_COMMAND.to_string(),
            source: InterpreterSource::Versioned,
        }
    } else if is_available(GENERIC_COMMAND) {
        Interpreter {
            command: GENERIC_COMMAND.to_string(),
            source: InterpreterSource::Generic,
        }
    } else {
        Interpreter {
            command: fallback.to_string(),
            source: InterpreterSource::Fallback,
        }
    };

    tracing::debug!(
        command = interpreter.command(),
        source = ?interpreter.source(),
        "resolved interpreter"
    );
    interpreter
}

/// What `--version` reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterVersion {
    /// First line of the version output, e.g. `Python 3.12.1`.
    pub raw: String,
    /// Parsed `major.minor[.patch]`, if the output contained one.
    pub version: Option<String>,
}

/// Extract `major.minor[.patch]` from version output.
pub fn parse_version(output: &str) -> Option<String> {
    let re = Regex::new(r"(\d+\.\d+(?:\.\d+)?)").ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Run `<python> --version` and report what it printed.
///
/// Fails with [`SetupError::InterpreterUnavailable`] when the interpreter
/// cannot be started or exits non-zero.
pub fn check_interpreter(
    runner: &dyn CommandRunner,
    interpreter: &Interpreter,
) -> Result<InterpreterVersion> {
    let spec = interpreter.version_command();

    match runner.run(&spec, CommandOptions::captured()) {
        Ok(result) if result.success => {
            let output = result.combined_output();
            let raw = output
                .lines()
                .next()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .unwrap_or(interpreter.command())
                .to_string();
            let version = parse_version(&raw);
            tracing::debug!(raw = %raw, version = ?version, "interpreter available");
            Ok(InterpreterVersion { raw, version })
        }
        Ok(result) => Err(SetupError::InterpreterUnavailable {
            command: interpreter.command().to_string(),
            reason: SetupError::CommandFailed {
                command: spec.to_string(),
                code: result.exit_code,
            }
            .to_string(),
        }),
        Err(SetupError::SpawnFailed { source, .. }) => Err(SetupError::InterpreterUnavailable {
            command: interpreter.command().to_string(),
            reason: source.to_string(),
        }),
        Err(other) => Err(SetupError::InterpreterUnavailable {
            command: interpreter.command().to_string(),
            reason: other.to_string(),
        }),
    }
}
