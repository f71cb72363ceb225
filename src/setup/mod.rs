//! The setup steps.
//!
//! A run is linear: resolve and check the interpreter, confirm with the
//! operator, install the packages, probe the optional tools. See
//! [`SetupRunner`] for the ordering and exit code rules.

pub mod confirm;
pub mod installer;
pub mod interpreter;
pub mod runner;
pub mod tools;

pub use confirm::{confirm_installation, is_affirmative};
pub use installer::{InstallSummary, InstalledPackage, Installer};
pub use interpreter::{
    check_interpreter, resolve_with, Interpreter, InterpreterSource, InterpreterVersion,
};
pub use runner::{SetupOutcome, SetupReport, SetupRunner, BANNER};
pub use tools::{check_optional_tools, probe_tool, ToolReport};
