//! Package installation with strategy fallback.
//!
//! Each package is tried with every [`InstallStrategy`] in order until one
//! succeeds. The first package that exhausts all strategies stops the run;
//! later packages are never attempted and a re-run starts from the top.

use crate::config::{InstallStrategy, Package};
use crate::error::{Result, SetupError};
use crate::shell::{CommandOptions, CommandRunner};
use crate::ui::{hints, SpinnerHandle, UserInterface};

use super::interpreter::Interpreter;

/// Lines of failed `pip` output kept in the error block.
const OUTPUT_TAIL_LINES: usize = 20;

/// A package that installed, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub package: &'static str,
    pub strategy: InstallStrategy,
}

/// Result of installing the whole package list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// Packages installed before the run finished or stopped.
    pub installed: Vec<InstalledPackage>,
    /// The package that exhausted every strategy, if any.
    pub failed: Option<&'static str>,
}

/// Drives `pip install` for a package list.
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    interpreter: &'a Interpreter,
    strategies: &'a [InstallStrategy],
}

impl<'a> Installer<'a> {
    /// Create an installer that runs `pip` through `interpreter`.
    pub fn new(
        runner: &'a dyn CommandRunner,
        interpreter: &'a Interpreter,
        strategies: &'a [InstallStrategy],
    ) -> Self {
        Self {
            runner,
            interpreter,
            strategies,
        }
    }

    /// Install every package in order, stopping at the first total failure.
    pub fn install_all(&self, ui: &mut dyn UserInterface, packages: &[Package]) -> InstallSummary {
        let python = self.interpreter.command();
        ui.message(&format!("Using Python command: {}", python));
        ui.message("Installing Python packages for image analysis...");

        let mut summary = InstallSummary::default();

        for package in packages {
            match self.install_package(ui, package) {
                Ok(installed) => summary.installed.push(installed),
                Err(e) => {
                    tracing::debug!(package = package.name, error = %e, "aborting installation");
                    ui.newline();
                    ui.message("You may need to create a virtual environment:");
                    for line in hints::venv_for_package(python, package.name) {
                        ui.show_hint(&line);
                    }
                    summary.failed = Some(package.name);
                    break;
                }
            }
        }

        summary
    }

    /// Try each strategy for one package until one exits zero.
    ///
    /// Returns [`SetupError::PackageInstallFailed`] when none does. A
    /// strategy whose command cannot even be started counts as failed.
    pub fn install_package(
        &self,
        ui: &mut dyn UserInterface,
        package: &Package,
    ) -> Result<InstalledPackage> {
        let streaming = ui.output_mode().shows_command_output();
        let start_msg = format!("Installing {}...", package.name);

        let mut spinner: Option<Box<dyn SpinnerHandle>> = if streaming {
            ui.message(&start_msg);
            None
        } else {
            Some(ui.start_spinner(&start_msg))
        };

        let options = if streaming {
            CommandOptions::inherited()
        } else {
            CommandOptions::captured()
        };

        let mut last_failure: Option<(String, String)> = None;

        for strategy in self.strategies {
            let spec = self.interpreter.pip_install(strategy.flag, package.name);
            if let Some(s) = spinner.as_mut() {
                s.set_message(&format!(
                    "Installing {} ({})...",
                    package.name, strategy.description
                ));
            }

            match self.runner.run(&spec, options) {
                Ok(result) if result.success => {
                    let msg = format!(
                        "{} installed successfully (using {})",
                        package.name, strategy.description
                    );
                    match spinner.as_mut() {
                        Some(s) => s.finish_success(&msg),
                        None => ui.success(&msg),
                    }
                    return Ok(InstalledPackage {
                        package: package.name,
                        strategy: *strategy,
                    });
                }
                Ok(result) => {
                    tracing::debug!(
                        command = %spec,
                        exit_code = ?result.exit_code,
                        stderr = %result.stderr.trim(),
                        "install strategy failed"
                    );
                    last_failure = Some((spec.to_string(), result.combined_output()));
                }
                Err(e) => {
                    tracing::debug!(command = %spec, error = %e, "install strategy failed");
                    last_failure = Some((spec.to_string(), e.to_string()));
                }
            }
        }

        let err = SetupError::PackageInstallFailed {
            package: package.name.to_string(),
        };
        match spinner.as_mut() {
            Some(s) => s.finish_error(&err.to_string()),
            None => ui.error(&err.to_string()),
        }

        if !streaming {
            if let Some((command, output)) = last_failure {
                ui.show_error_block(&command, &tail(&output, OUTPUT_TAIL_LINES));
            }
        }

        Err(err)
    }
}

/// The last `n` lines of `output`.
fn tail(output: &str, n: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
