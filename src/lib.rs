//! Image analysis setup - installs the Python libraries behind AI-powered
//! alt text generation.
//!
//! The utility finds a Python interpreter, asks the operator to confirm, and
//! installs `torch`, `transformers`, `Pillow` and `numpy` with `pip`, trying
//! a user-local install before overriding a system-managed environment. It
//! then checks for Tesseract OCR and ExifTool and prints install hints for
//! whichever is missing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line flags
//! - [`config`] - Fixed package, strategy and tool lists
//! - [`error`] - Error types and result aliases
//! - [`setup`] - The setup steps and the runner that orders them
//! - [`shell`] - External command execution and PATH lookup
//! - [`ui`] - Terminal output, prompts and spinners
//!
//! # Example
//!
//! ```
//! use image_analysis_setup::config::SetupConfig;
//! use image_analysis_setup::setup::{SetupOutcome, SetupRunner};
//! use image_analysis_setup::shell::MockRunner;
//! use image_analysis_setup::ui::MockUI;
//!
//! let config = SetupConfig::default();
//! let commands = MockRunner::new();
//! let mut ui = MockUI::new();
//! ui.queue_answers(vec!["y"]);
//!
//! let report = SetupRunner::new(&config, &commands)
//!     .with_lookup(|name| name == "python3")
//!     .run(&mut ui)
//!     .unwrap();
//! assert_eq!(report.outcome, SetupOutcome::Completed);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod setup;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
