//! Error types for setup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the utility, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SetupError` for the failures the run reports to the operator
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use thiserror::Error;

/// Core error type for setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The chosen interpreter could not be run.
    #[error("Python not found: {reason}")]
    InterpreterUnavailable { command: String, reason: String },

    /// A command could not be spawned at all.
    #[error("Failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Every installation strategy failed for a package.
    #[error("Failed to install {package} with all methods")]
    PackageInstallFailed { package: String },

    /// The operator declined the confirmation prompt.
    #[error("Setup cancelled.")]
    Cancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected failure with context attached, e.g. unreadable stdin.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpreter_unavailable_displays_reason() {
        let err = SetupError::InterpreterUnavailable {
            command: "python3".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(err.to_string(), "Python not found: No such file or directory");
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = SetupError::CommandFailed {
            command: "python3 -m pip install --user torch".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3 -m pip install --user torch"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn spawn_failed_displays_command_and_cause() {
        let err = SetupError::SpawnFailed {
            command: "exiftool -ver".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("exiftool -ver"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn package_install_failed_displays_package() {
        let err = SetupError::PackageInstallFailed {
            package: "transformers".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to install transformers with all methods"
        );
    }

    #[test]
    fn cancelled_matches_prompt_wording() {
        assert_eq!(SetupError::Cancelled.to_string(), "Setup cancelled.");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts_to_other() {
        let err: SetupError = anyhow::anyhow!("unexpected").into();
        assert!(matches!(err, SetupError::Other(_)));
        assert_eq!(err.to_string(), "unexpected");
    }
}
