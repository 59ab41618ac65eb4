//! ffmpeg subprocess glue.
//!
//! The chapter core itself never touches the filesystem or spawns
//! processes; this module is the fixed contract its callers use to talk to
//! the external tools:
//!
//! - **Locating**: Find ffmpeg/ffprobe on PATH or in well-known install
//!   directories, returning an explicit executable path
//! - **Reading**: Dump a file's container metadata as ffmetadata text
//! - **Writing**: Remux a file with edited metadata, replacing the
//!   original atomically on success
//! - **Probing**: Query a file's duration for the editor's tail-insert case
//!
//! All operations take the resolved executable path explicitly; ambient
//! process state (PATH) is never mutated.

mod locate;
mod metadata;
mod probe;

// Re-export functions
pub use locate::{common_install_dirs, find_tool};
pub use metadata::{apply_metadata, read_metadata};
pub use probe::probe_duration_ms;

/// Errors from external tool invocations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    /// The tool binary could not be started at all.
    #[error("failed to spawn {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited with a failure code.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The tool's output could not be interpreted.
    #[error("failed to parse tool output: {0}")]
    ParseError(String),

    /// Filesystem operation around the tool invocation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for tool invocation results.
pub type FfmpegResult<T> = Result<T, FfmpegError>;
