//! End-to-end tests driving the binary against fake tools on a private PATH.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("image-analysis-setup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--python-fallback"))
        .stdout(predicate::str::contains("--verbose"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("image-analysis-setup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_flag() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("image-analysis-setup"));
    cmd.arg("--frobnicate");
    cmd.assert().failure();
    Ok(())
}

#[cfg(unix)]
mod fake_tools {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// A temporary directory used as the whole PATH.
    struct FakeBin {
        dir: TempDir,
    }

    impl FakeBin {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        fn pip_log(&self) -> PathBuf {
            self.dir.path().join("pip.log")
        }

        fn write_script(&self, name: &str, body: &str) {
            let path = self.dir.path().join(name);
            fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        /// Install a `python3` that reports 3.12.1 and logs every pip call.
        ///
        /// Any install whose arguments mention `failing` exits non-zero.
        fn python(&self, failing: Option<&str>) {
            let fail_case = match failing {
                Some(pkg) => format!(
                    "case \"$*\" in *\" {pkg}\") echo \"ERROR: No matching distribution found for {pkg}\"; exit 1;; esac\n"
                ),
                None => String::new(),
            };
            let body = format!(
                "if [ \"$1\" = \"--version\" ]; then echo \"Python 3.12.1\"; exit 0; fi\n\
                 echo \"$*\" >> \"{log}\"\n\
                 {fail_case}\
                 echo \"Successfully installed\"\n\
                 exit 0\n",
                log = self.pip_log().display(),
            );
            self.write_script("python3", &body);
        }

        fn tool(&self, name: &str) {
            self.write_script(name, "echo \"fake 1.0\"\nexit 0\n");
        }

        fn pip_calls(&self) -> Vec<String> {
            fs::read_to_string(self.pip_log())
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }

        fn command(&self) -> Command {
            let mut cmd = Command::new(cargo_bin("image-analysis-setup"));
            cmd.env("PATH", self.path())
                .env("NO_COLOR", "1")
                .env_remove("RUST_LOG")
                .env_remove("IMAGE_SETUP_PYTHON_FALLBACK");
            cmd
        }
    }

    #[test]
    fn confirmed_run_installs_everything() -> Result<(), Box<dyn std::error::Error>> {
        let bin = FakeBin::new();
        bin.python(None);
        bin.tool("tesseract");
        bin.tool("exiftool");

        bin.command()
            .write_stdin("y\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Python found: Python 3.12.1"))
            .stdout(predicate::str::contains("Using Python command: python3"))
            .stdout(predicate::str::contains(
                "torch installed successfully (using user directory)",
            ))
            .stdout(predicate::str::contains(
                "All Python packages installed successfully!",
            ))
            .stdout(predicate::str::contains("Tesseract OCR is available"))
            .stdout(predicate::str::contains("ExifTool is available"))
            .stdout(predicate::str::contains("Setup complete!"));

        assert_eq!(
            bin.pip_calls(),
            vec![
                "-m pip install --user torch",
                "-m pip install --user transformers",
                "-m pip install --user Pillow",
                "-m pip install --user numpy",
            ]
        );
        Ok(())
    }

    #[test]
    fn failed_package_stops_remaining_installs() -> Result<(), Box<dyn std::error::Error>> {
        let bin = FakeBin::new();
        bin.python(Some("transformers"));

        bin.command()
            .write_stdin("yes\n")
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "Failed to install transformers with all methods",
            ))
            .stdout(predicate::str::contains(
                "No matching distribution found for transformers",
            ))
            .stdout(predicate::str::contains(
                "You may need to create a virtual environment:",
            ))
            .stdout(predicate::str::contains("pipx install torch transformers Pillow numpy"))
            .stdout(predicate::str::contains("Checking optional tools:"))
            .stdout(predicate::str::contains("Tesseract OCR not found"))
            .stdout(predicate::str::contains("Setup complete!").not());

        let calls = bin.pip_calls();
        assert_eq!(
            calls,
            vec![
                "-m pip install --user torch",
                "-m pip install --user transformers",
                "-m pip install --break-system-packages transformers",
            ]
        );
        assert!(!calls.iter().any(|c| c.contains("Pillow") || c.contains("numpy")));
        Ok(())
    }

    #[test]
    fn declined_prompt_cancels() -> Result<(), Box<dyn std::error::Error>> {
        for answer in ["n\n", "\n", "maybe\n", ""] {
            let bin = FakeBin::new();
            bin.python(None);

            bin.command()
                .write_stdin(answer)
                .assert()
                .code(1)
                .stdout(predicate::str::contains("Do you want to proceed? (y/N)"))
                .stdout(predicate::str::contains("Setup cancelled."))
                .stdout(predicate::str::contains("Checking optional tools:").not());

            assert!(bin.pip_calls().is_empty(), "answer {:?} installed", answer);
        }
        Ok(())
    }

    #[test]
    fn undecodable_answer_cancels() -> Result<(), Box<dyn std::error::Error>> {
        let bin = FakeBin::new();
        bin.python(None);

        bin.command()
            .write_stdin(vec![0xff, 0xfe, b'\n'])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Setup cancelled."))
            .stdout(predicate::str::contains("Error:").not());

        assert!(bin.pip_calls().is_empty());
        Ok(())
    }

    #[test]
    fn missing_interpreter_exits_before_prompt() -> Result<(), Box<dyn std::error::Error>> {
        let bin = FakeBin::new();
        let fallback = bin.path().join("no-such-python");

        bin.command()
            .arg("--python-fallback")
            .arg(&fallback)
            .write_stdin("y\n")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Python not found"))
            .stdout(predicate::str::contains("Please install Python 3.7+"))
            .stdout(predicate::str::contains("Do you want to proceed").not());
        Ok(())
    }

    #[test]
    fn quiet_mode_omits_explanations() -> Result<(), Box<dyn std::error::Error>> {
        let bin = FakeBin::new();
        bin.python(None);
        bin.tool("tesseract");
        bin.tool("exiftool");

        bin.command()
            .arg("--quiet")
            .write_stdin("y\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Setup complete!"))
            .stdout(predicate::str::contains("Usage:").not())
            .stdout(predicate::str::contains("This will install Python packages").not());
        Ok(())
    }
}
