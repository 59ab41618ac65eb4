//! Duration probing via ffprobe.
//!
//! The editor's tail-insert case needs the file's total duration; the GUI
//! player knows it, but a headless caller has to ask ffprobe.

use std::path::Path;
use std::process::Command;

use super::{FfmpegError, FfmpegResult};

/// Probe a media file's duration in milliseconds.
///
/// Runs `ffprobe -v quiet -print_format json -show_format <input>` and
/// reads `format.duration` from the JSON output.
pub fn probe_duration_ms(ffprobe: &Path, input: &Path) -> FfmpegResult<i64> {
    let output = Command::new(ffprobe)
        .arg("-v")
        .arg("quiet")
        .arg("-print_format")
        .arg("json")
        .arg("-show_format")
        .arg(input)
        .output()
        .map_err(|e| FfmpegError::SpawnFailed {
            tool: "ffprobe".to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(FfmpegError::CommandFailed {
            tool: "ffprobe".to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|e| FfmpegError::ParseError(format!("invalid JSON from ffprobe: {e}")))?;

    // ffprobe reports duration as a decimal-seconds string
    let duration_secs = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| FfmpegError::ParseError("no duration in ffprobe output".to_string()))?;

    Ok((duration_secs * 1000.0).round() as i64)
}
