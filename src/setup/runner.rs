//! The setup run, start to finish.

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::shell::{is_on_path, CommandRunner};
use crate::ui::{hints, UserInterface};

use super::confirm::confirm_installation;
use super::installer::{InstallSummary, Installer};
use super::interpreter::{check_interpreter, resolve_with, Interpreter, InterpreterVersion};
use super::tools::{check_optional_tools, ToolReport};

/// Banner shown at the top of the run.
pub const BANNER: &str = "EPUB Accessibility Fixer - Image Analysis Setup";

/// How the run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Every package installed.
    Completed,
    /// The interpreter could not be run; nothing was installed.
    InterpreterUnavailable,
    /// The operator declined the prompt.
    Cancelled,
    /// A package exhausted every installation strategy.
    InstallFailed { package: String },
}

impl SetupOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupOutcome::Completed => 0,
            _ => 1,
        }
    }
}

/// Everything a run found and did.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub outcome: SetupOutcome,
    pub interpreter: Interpreter,
    pub version: Option<InterpreterVersion>,
    pub install: InstallSummary,
    /// Empty when the run stopped before the tool checks.
    pub tools: Vec<ToolReport>,
}

impl SetupReport {
    fn stopped(outcome: SetupOutcome, interpreter: Interpreter) -> Self {
        Self {
            outcome,
            interpreter,
            version: None,
            install: InstallSummary::default(),
            tools: Vec::new(),
        }
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

/// Runs the setup steps in order against a command runner.
pub struct SetupRunner<'a> {
    config: &'a SetupConfig,
    commands: &'a dyn CommandRunner,
    lookup: fn(&str) -> bool,
}

impl<'a> SetupRunner<'a> {
    /// Create a runner that looks interpreters up on the process PATH.
    pub fn new(config: &'a SetupConfig, commands: &'a dyn CommandRunner) -> Self {
        Self {
            config,
            commands,
            lookup: is_on_path,
        }
    }

    /// Replace the PATH lookup used to pick the interpreter.
    pub fn with_lookup(mut self, lookup: fn(&str) -> bool) -> Self {
        self.lookup = lookup;
        self
    }

    /// Run every step.
    ///
    /// Expected failures (missing interpreter, declined prompt, failed
    /// install) are reported to `ui` and come back as a [`SetupOutcome`];
    /// `Err` is reserved for unexpected problems such as unreadable stdin.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<SetupReport> {
        let details = ui.output_mode().shows_details();
        ui.show_header(BANNER);

        let interpreter = resolve_with(self.lookup, &self.config.python_fallback);

        let version = match check_interpreter(self.commands, &interpreter) {
            Ok(version) => {
                ui.success(&format!("Python found: {}", version.raw));
                version
            }
            Err(e) => {
                ui.error(&e.to_string());
                ui.newline();
                ui.message(
                    "Python is required but not found. Please install Python 3.7+ and try again.",
                );
                return Ok(SetupReport::stopped(
                    SetupOutcome::InterpreterUnavailable,
                    interpreter,
                ));
            }
        };

        ui.newline();
        ui.success(&format!("Using Python: {}", interpreter.command()));
        if details {
            ui.newline();
            ui.message("This will install Python packages for AI-powered image analysis.");
            ui.message(
                "This enables automatic generation of meaningful alt text based on image content.",
            );
        }

        match confirm_installation(ui, &self.config.packages) {
            Ok(()) => {}
            Err(SetupError::Cancelled) => {
                ui.message(&SetupError::Cancelled.to_string());
                let mut report = SetupReport::stopped(SetupOutcome::Cancelled, interpreter);
                report.version = Some(version);
                return Ok(report);
            }
            Err(e) => return Err(e),
        }

        let installer = Installer::new(self.commands, &interpreter, &self.config.strategies);
        let install = installer.install_all(ui, &self.config.packages);

        let outcome = match install.failed {
            None => {
                ui.newline();
                ui.success("All Python packages installed successfully!");
                if details {
                    ui.newline();
                    for line in hints::after_successful_install() {
                        ui.message(line);
                    }
                }
                SetupOutcome::Completed
            }
            Some(package) => {
                ui.newline();
                ui.error("Some packages failed to install.");
                self.show_recovery_options(ui, interpreter.command());
                SetupOutcome::InstallFailed {
                    package: package.to_string(),
                }
            }
        };

        let tools = check_optional_tools(
            self.commands,
            ui,
            &self.config.tools,
            self.config.platform,
        );

        if outcome == SetupOutcome::Completed {
            ui.newline();
            ui.message("🎉 Setup complete!");
            if details {
                ui.newline();
                ui.message("Usage:");
                for line in hints::usage() {
                    ui.message(line);
                }
            }
        }

        tracing::debug!(outcome = ?outcome, "setup finished");

        Ok(SetupReport {
            outcome,
            interpreter,
            version: Some(version),
            install,
            tools,
        })
    }

    fn show_recovery_options(&self, ui: &mut dyn UserInterface, python: &str) {
        ui.newline();
        ui.message("For externally managed Python environments (like Homebrew), try:");
        let packages = self.config.package_names();
        for (i, option) in hints::after_failed_install(python, &packages)
            .iter()
            .enumerate()
        {
            ui.newline();
            ui.message(&format!("{}. {}:", i + 1, option.title));
            for command in &option.commands {
                ui.show_hint(command);
            }
        }
    }
}
