//! CLI argument definitions.
//!
//! The run itself takes no arguments; these flags only adjust output,
//! logging and the last-resort interpreter.

use clap::Parser;

use crate::config::{SetupConfig, DEFAULT_PYTHON_FALLBACK};
use crate::ui::OutputMode;

/// Install the Python libraries used for AI-powered image analysis.
#[derive(Debug, Parser)]
#[command(name = "image-analysis-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show pip output while installing
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Interpreter to use when neither python3 nor python is on PATH
    #[arg(
        long,
        value_name = "PATH",
        env = "IMAGE_SETUP_PYTHON_FALLBACK",
        default_value = DEFAULT_PYTHON_FALLBACK
    )]
    pub python_fallback: String,
}

impl Cli {
    /// Output mode selected by `--verbose` / `--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.verbose, self.quiet)
    }

    /// Build the run configuration.
    pub fn setup_config(&self) -> SetupConfig {
        SetupConfig::default().with_python_fallback(&self.python_fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["image-analysis-setup"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.debug);
        assert_eq!(cli.output_mode(), OutputMode::Normal);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["image-analysis-setup", "-v", "-q"]).is_err());
    }

    #[test]
    fn python_fallback_flag_reaches_config() {
        let cli = Cli::try_parse_from([
            "image-analysis-setup",
            "--python-fallback",
            "/opt/python/bin/python3",
        ])
        .unwrap();
        assert_eq!(cli.setup_config().python_fallback, "/opt/python/bin/python3");
    }

    #[test]
    fn quiet_flag_sets_mode() {
        let cli = Cli::try_parse_from(["image-analysis-setup", "--quiet"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["image-analysis-setup", "torch"]).is_err());
    }
}
