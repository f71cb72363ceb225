//! Run configuration.
//!
//! The package list, installation strategies and optional tools are fixed.
//! [`SetupConfig`] bundles them with the few values that can be set from the
//! command line, so the setup steps never read globals and tests can swap
//! in their own lists.

use std::fmt;

use crate::shell::{CommandSpec, Platform};

/// Interpreter used when neither `python3` nor `python` is on PATH.
#[cfg(unix)]
pub const DEFAULT_PYTHON_FALLBACK: &str = "/usr/bin/python3";
/// Interpreter used when neither `python3` nor `python` is on PATH.
#[cfg(not(unix))]
pub const DEFAULT_PYTHON_FALLBACK: &str = "python.exe";

/// A pip package to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    /// Name passed to `pip install`.
    pub name: &'static str,
    /// What the package is better known as, if anything.
    pub label: Option<&'static str>,
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{} ({})", self.name, label),
            None => f.write_str(self.name),
        }
    }
}

/// Packages needed for image analysis, in install order.
pub const PACKAGES: &[Package] = &[
    Package {
        name: "torch",
        label: Some("PyTorch"),
    },
    Package {
        name: "transformers",
        label: Some("Hugging Face"),
    },
    Package {
        name: "Pillow",
        label: Some("PIL"),
    },
    Package {
        name: "numpy",
        label: None,
    },
];

/// A way of invoking `pip install`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallStrategy {
    /// Flag passed to `pip install`.
    pub flag: &'static str,
    /// Shown after a successful install.
    pub description: &'static str,
}

/// Strategies in priority order.
pub const INSTALL_STRATEGIES: &[InstallStrategy] = &[
    InstallStrategy {
        flag: "--user",
        description: "user directory",
    },
    InstallStrategy {
        flag: "--break-system-packages",
        description: "system packages (with override)",
    },
];

/// An external tool that improves results but is not required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalTool {
    /// Display name.
    pub name: &'static str,
    /// Executable to probe.
    pub program: &'static str,
    /// Arguments that make the program print its version and exit.
    pub version_args: &'static [&'static str],
    /// What the tool is used for, completing "Install it for ...".
    pub purpose: &'static str,
    pub macos_hints: &'static [&'static str],
    pub linux_hints: &'static [&'static str],
    pub other_hints: &'static [&'static str],
}

impl OptionalTool {
    /// The command used to probe for this tool.
    pub fn version_command(&self) -> CommandSpec {
        CommandSpec::new(self.program).args(self.version_args.iter().copied())
    }

    /// Installation hints for one platform bucket.
    pub fn install_hints(&self, platform: Platform) -> &'static [&'static str] {
        match platform {
            Platform::MacOs => self.macos_hints,
            Platform::Linux => self.linux_hints,
            Platform::Other => self.other_hints,
        }
    }
}

/// Optional tools, in probe order.
pub const OPTIONAL_TOOLS: &[OptionalTool] = &[
    OptionalTool {
        name: "Tesseract OCR",
        program: "tesseract",
        version_args: &["--version"],
        purpose: "text extraction from images",
        macos_hints: &["brew install tesseract"],
        linux_hints: &[
            "sudo apt-get install tesseract-ocr  # Debian/Ubuntu",
            "sudo yum install tesseract          # CentOS/RHEL",
        ],
        other_hints: &["See: https://github.com/tesseract-ocr/tesseract"],
    },
    OptionalTool {
        name: "ExifTool",
        program: "exiftool",
        version_args: &["-ver"],
        purpose: "image metadata extraction",
        macos_hints: &["brew install exiftool"],
        linux_hints: &[
            "sudo apt-get install libimage-exiftool-perl  # Debian/Ubuntu",
            "sudo yum install perl-Image-ExifTool         # CentOS/RHEL",
        ],
        other_hints: &["See: https://exiftool.org/"],
    },
];

/// Everything one setup run needs to know.
#[derive(Debug, Clone)]
pub struct SetupConfig {
    pub packages: Vec<Package>,
    pub strategies: Vec<InstallStrategy>,
    pub tools: Vec<OptionalTool>,
    /// Last-resort interpreter command.
    pub python_fallback: String,
    /// Platform the tool hints are written for.
    pub platform: Platform,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            packages: PACKAGES.to_vec(),
            strategies: INSTALL_STRATEGIES.to_vec(),
            tools: OPTIONAL_TOOLS.to_vec(),
            python_fallback: DEFAULT_PYTHON_FALLBACK.to_string(),
            platform: Platform::current(),
        }
    }
}

impl SetupConfig {
    /// Override the last-resort interpreter.
    pub fn with_python_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.python_fallback = fallback.into();
        self
    }

    /// Override the platform used for tool hints.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Package names, in install order.
    pub fn package_names(&self) -> Vec<&'static str> {
        self.packages.iter().map(|p| p.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packages_in_install_order() {
        let config = SetupConfig::default();
        assert_eq!(
            config.package_names(),
            vec!["torch", "transformers", "Pillow", "numpy"]
        );
    }

    #[test]
    fn package_display_includes_label() {
        assert_eq!(PACKAGES[0].to_string(), "torch (PyTorch)");
        assert_eq!(PACKAGES[2].to_string(), "Pillow (PIL)");
        assert_eq!(PACKAGES[3].to_string(), "numpy");
    }

    #[test]
    fn user_install_is_tried_first() {
        assert_eq!(INSTALL_STRATEGIES[0].flag, "--user");
        assert_eq!(INSTALL_STRATEGIES[1].flag, "--break-system-packages");
    }

    #[test]
    fn tool_version_commands() {
        assert_eq!(
            OPTIONAL_TOOLS[0].version_command().to_string(),
            "tesseract --version"
        );
        assert_eq!(OPTIONAL_TOOLS[1].version_command().to_string(), "exiftool -ver");
    }

    #[test]
    fn every_tool_has_hints_for_every_platform() {
        for tool in OPTIONAL_TOOLS {
            for platform in Platform::all() {
                assert!(
                    !tool.install_hints(platform).is_empty(),
                    "{} has no {} hints",
                    tool.name,
                    platform
                );
            }
        }
    }

    #[test]
    fn builder_overrides() {
        let config = SetupConfig::default()
            .with_python_fallback("/opt/python/bin/python3")
            .with_platform(Platform::Other);
        assert_eq!(config.python_fallback, "/opt/python/bin/python3");
        assert_eq!(config.platform, Platform::Other);
    }
}
