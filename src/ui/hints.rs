//! Remediation and follow-up text.
//!
//! Builds the command suggestions shown when an installation fails and the
//! explanatory text shown once setup succeeds.

/// Directory name suggested for the virtual environment.
pub const VENV_DIR: &str = "epub-env";

/// One numbered way out of a failed installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationOption {
    /// Short title, e.g. "Using pipx (recommended)".
    pub title: &'static str,
    /// Commands to run, one per line.
    pub commands: Vec<String>,
}

/// Commands that install a single package inside a fresh virtual environment.
pub fn venv_for_package(python: &str, package: &str) -> Vec<String> {
    vec![
        format!("{} -m venv {}", python, VENV_DIR),
        format!("source {}/bin/activate  # On macOS/Linux", VENV_DIR),
        format!("{} -m pip install {}", python, package),
    ]
}

/// Options shown after the installation run has failed.
///
/// `packages` is the full package list, not just the one that failed, since
/// the fresh environment needs all of them.
pub fn after_failed_install(python: &str, packages: &[&str]) -> Vec<RemediationOption> {
    let all = packages.join(" ");
    vec![
        RemediationOption {
            title: "Using pipx (recommended)",
            commands: vec!["brew install pipx".to_string(), format!("pipx install {}", all)],
        },
        RemediationOption {
            title: "Using virtual environment",
            commands: vec![
                format!("{} -m venv {}", python, VENV_DIR),
                format!("source {}/bin/activate", VENV_DIR),
                format!("{} -m pip install {}", python, all),
            ],
        },
        RemediationOption {
            title: "Force install to user directory",
            commands: vec![format!("{} -m pip install --user {}", python, all)],
        },
    ]
}

/// What the operator gets once every package is installed.
pub fn after_successful_install() -> &'static [&'static str] {
    &[
        "Image analysis capabilities are now available.",
        "The alt text fixer will automatically use AI models to generate",
        "descriptive alt text based on actual image content.",
    ]
}

/// Usage notes printed with the completion banner.
pub fn usage() -> &'static [&'static str] {
    &[
        "The image analysis will be used automatically when fixing alt text.",
        "No additional configuration is required.",
    ]
}
