//! Settings struct with TOML-based sections.
//!
//! Every field carries a serde default so a partial or missing config file
//! still deserializes into something usable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// External tool discovery.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Chapter editing defaults.
    #[serde(default)]
    pub chapters: ChapterSettings,
}

/// Explicit tool paths and extra search locations.
///
/// Empty path strings mean "discover automatically" via
/// [`crate::ffmpeg::find_tool`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Explicit path to the ffmpeg executable.
    #[serde(default)]
    pub ffmpeg_path: String,

    /// Explicit path to the ffprobe executable.
    #[serde(default)]
    pub ffprobe_path: String,

    /// Directories searched before the built-in install locations.
    #[serde(default)]
    pub search_dirs: Vec<String>,
}

impl ToolSettings {
    /// Configured ffmpeg path, if one was set.
    pub fn ffmpeg_override(&self) -> Option<PathBuf> {
        non_empty_path(&self.ffmpeg_path)
    }

    /// Configured ffprobe path, if one was set.
    pub fn ffprobe_override(&self) -> Option<PathBuf> {
        non_empty_path(&self.ffprobe_path)
    }

    /// Extra search directories as paths.
    pub fn search_dir_paths(&self) -> Vec<PathBuf> {
        self.search_dirs.iter().map(PathBuf::from).collect()
    }
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter level when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Chapter editing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSettings {
    /// Title used when an insertion supplies an empty one.
    #[serde(default = "default_chapter_title")]
    pub default_title: String,
}

impl Default for ChapterSettings {
    fn default() -> Self {
        Self {
            default_title: default_chapter_title(),
        }
    }
}

fn default_chapter_title() -> String {
    "New Chapter".to_string()
}
