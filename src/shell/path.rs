//! PATH lookup for executables.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        for name in candidate_names(tool) {
            let candidate = dir.join(&name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Find `tool` on the current process PATH.
pub fn find_on_path(tool: &str) -> Option<PathBuf> {
    resolve_tool_path(tool, &parse_system_path())
}

/// Whether `tool` is on the current process PATH.
pub fn is_on_path(tool: &str) -> bool {
    find_on_path(tool).is_some()
}

#[cfg(windows)]
fn candidate_names(tool: &str) -> Vec<String> {
    if Path::new(tool).extension().is_some() {
        vec![tool.to_string()]
    } else {
        vec![format!("{}.exe", tool), tool.to_string()]
    }
}

#[cfg(not(windows))]
fn candidate_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_executable(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn resolves_first_matching_entry() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_executable(second.path(), "python3");
        let expected = write_executable(first.path(), "python3");

        let entries = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(resolve_tool_path("python3", &entries), Some(expected));
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_executable_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("python"), "not a program").unwrap();

        let entries = vec![dir.path().to_path_buf()];
        assert_eq!(resolve_tool_path("python", &entries), None);
    }

    #[test]
    fn skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("python3")).unwrap();

        let entries = vec![dir.path().to_path_buf()];
        assert_eq!(resolve_tool_path("python3", &entries), None);
    }

    #[test]
    fn empty_path_finds_nothing() {
        assert_eq!(resolve_tool_path("python3", &[]), None);
    }
}
