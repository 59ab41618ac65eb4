//! Executable discovery for the external tools.
//!
//! Resolution order: an explicitly configured path, then every PATH entry,
//! then a fixed set of well-known install locations. The resolved path is
//! handed to the invocation functions explicitly so the process-wide PATH
//! never needs to change.

use std::env;
use std::path::{Path, PathBuf};

/// Well-known install locations checked after PATH.
pub fn common_install_dirs() -> Vec<PathBuf> {
    #[cfg(windows)]
    {
        vec![
            PathBuf::from("C:\\ffmpeg\\bin"),
            PathBuf::from("C:\\Program Files\\ffmpeg\\bin"),
            PathBuf::from("C:\\Program Files (x86)\\ffmpeg\\bin"),
        ]
    }

    #[cfg(not(windows))]
    {
        vec![
            // Homebrew (Apple Silicon, then Intel)
            PathBuf::from("/opt/homebrew/bin"),
            PathBuf::from("/usr/local/bin"),
            PathBuf::from("/usr/bin"),
        ]
    }
}

/// Platform executable file name for a tool.
fn executable_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

/// Resolve the executable path for a tool such as `ffmpeg` or `ffprobe`.
///
/// A configured path wins if it points at an existing file. Otherwise PATH
/// entries are searched, then `extra_dirs`, then the well-known install
/// locations. Returns `None` when the tool cannot be found anywhere.
pub fn find_tool(name: &str, configured: Option<&Path>, extra_dirs: &[PathBuf]) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(
            "Configured path for {} does not exist: {}",
            name,
            path.display()
        );
    }

    let file_name = executable_name(name);

    if let Some(paths) = env::var_os("PATH") {
        for dir in env::split_paths(&paths) {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                tracing::debug!("Found {} on PATH: {}", name, candidate.display());
                return Some(candidate);
            }
        }
    }

    for dir in extra_dirs.iter().cloned().chain(common_install_dirs()) {
        let candidate = dir.join(&file_name);
        if candidate.is_file() {
            tracing::debug!("Found {} in install dir: {}", name, candidate.display());
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn configured_path_wins() {
        let dir = tempdir().unwrap();
        let tool = dir.path().join(executable_name("ffmpeg"));
        fs::write(&tool, b"").unwrap();

        let found = find_tool("ffmpeg", Some(&tool), &[]).unwrap();
        assert_eq!(found, tool);
    }

    #[test]
    fn missing_configured_path_falls_through() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope").join("ffmpeg");
        let install_dir = dir.path().join("install");
        fs::create_dir(&install_dir).unwrap();
        let tool = install_dir.join(executable_name("ffmpeg"));
        fs::write(&tool, b"").unwrap();

        let found = find_tool("ffmpeg", Some(&missing), &[install_dir]).unwrap();
        assert_eq!(found, tool);
    }

    #[test]
    fn extra_dirs_are_searched() {
        let dir = tempdir().unwrap();
        let tool = dir.path().join(executable_name("ffprobe"));
        fs::write(&tool, b"").unwrap();

        let found = find_tool("ffprobe", None, &[dir.path().to_path_buf()]);
        assert_eq!(found, Some(tool));
    }

    #[test]
    fn unknown_tool_is_none() {
        let dir = tempdir().unwrap();
        assert!(find_tool("definitely-not-a-real-tool", None, &[dir.path().to_path_buf()]).is_none());
    }
}
