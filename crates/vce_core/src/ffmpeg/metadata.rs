//! Container metadata read and write via ffmpeg.
//!
//! Reading dumps the container metadata in ffmetadata format to stdout.
//! Writing remuxes the streams unchanged (`-codec copy`) with the edited
//! metadata mapped in, into a sibling output file that atomically replaces
//! the original on success.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{FfmpegError, FfmpegResult};

/// Dump a file's container metadata as ffmetadata text.
///
/// Runs `ffmpeg -i <input> -f ffmetadata -` and returns captured stdout.
pub fn read_metadata(ffmpeg: &Path, input: &Path) -> FfmpegResult<String> {
    tracing::debug!("Reading metadata from {}", input.display());

    let output = Command::new(ffmpeg)
        .arg("-i")
        .arg(input)
        .arg("-f")
        .arg("ffmetadata")
        .arg("-")
        .output()
        .map_err(|e| FfmpegError::SpawnFailed {
            tool: "ffmpeg".to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(FfmpegError::CommandFailed {
            tool: "ffmpeg".to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Write edited metadata text into the container and replace the original.
///
/// The metadata is staged in a sidecar file next to the input, the streams
/// are remuxed with `-map_metadata 1 -codec copy` into `<input>.new.<ext>`,
/// and the output is renamed over the original only after ffmpeg reports
/// success. On failure the original is left untouched and the partial
/// output is removed. The sidecar is removed in all cases.
pub fn apply_metadata(ffmpeg: &Path, input: &Path, metadata: &str) -> FfmpegResult<()> {
    let sidecar = sidecar_path(input);
    std::fs::write(&sidecar, metadata)?;

    let remux_output = remux_output_path(input);

    tracing::debug!(
        "Remuxing {} with updated metadata into {}",
        input.display(),
        remux_output.display()
    );

    let result = Command::new(ffmpeg)
        .arg("-i")
        .arg(input)
        .arg("-i")
        .arg(&sidecar)
        .arg("-map_metadata")
        .arg("1")
        .arg("-codec")
        .arg("copy")
        .arg("-y")
        .arg(&remux_output)
        .output();

    // The sidecar is transient regardless of outcome.
    let _ = std::fs::remove_file(&sidecar);

    let output = result.map_err(|e| FfmpegError::SpawnFailed {
        tool: "ffmpeg".to_string(),
        source: e,
    })?;

    if !output.status.success() {
        if remux_output.exists() {
            let _ = std::fs::remove_file(&remux_output);
        }
        return Err(FfmpegError::CommandFailed {
            tool: "ffmpeg".to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    if let Err(e) = std::fs::rename(&remux_output, input) {
        // The remux output is as much a partial result as a failed run's.
        let _ = std::fs::remove_file(&remux_output);
        return Err(e.into());
    }

    tracing::info!("Wrote chapter metadata into {}", input.display());
    Ok(())
}

/// Sidecar file that stages the metadata text for ffmpeg.
fn sidecar_path(input: &Path) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(".metadata.txt");
    PathBuf::from(os)
}

/// Remux destination next to the input, keeping its extension.
fn remux_output_path(input: &Path) -> PathBuf {
    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("mkv");
    let mut os = input.as_os_str().to_os_string();
    os.push(format!(".new.{ext}"));
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_metadata_from_missing_tool_fails() {
        let err = read_metadata(
            Path::new("/nonexistent/ffmpeg"),
            Path::new("/nonexistent/file.mkv"),
        )
        .unwrap_err();
        assert!(matches!(err, FfmpegError::SpawnFailed { .. }));
    }

    #[test]
    fn sidecar_sits_next_to_input() {
        let path = sidecar_path(Path::new("/videos/movie.mkv"));
        assert_eq!(path, PathBuf::from("/videos/movie.mkv.metadata.txt"));
    }

    #[test]
    fn remux_output_keeps_extension() {
        let path = remux_output_path(Path::new("/videos/movie.mp4"));
        assert_eq!(path, PathBuf::from("/videos/movie.mp4.new.mp4"));
    }

    #[test]
    fn remux_output_defaults_to_mkv() {
        let path = remux_output_path(Path::new("/videos/movie"));
        assert_eq!(path, PathBuf::from("/videos/movie.new.mkv"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_remux_cleans_up_and_preserves_input() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let fake_ffmpeg = dir.path().join("ffmpeg");
        fs::write(&fake_ffmpeg, "#!/bin/sh\nexit 1\n").unwrap();
        fs::set_permissions(&fake_ffmpeg, fs::Permissions::from_mode(0o755)).unwrap();

        let input = dir.path().join("video.mkv");
        fs::write(&input, b"container bytes").unwrap();

        let err = apply_metadata(&fake_ffmpeg, &input, ";FFMETADATA1\n").unwrap_err();
        assert!(matches!(err, FfmpegError::CommandFailed { exit_code: 1, .. }));

        // Original untouched, no stray sidecar or partial output.
        assert_eq!(fs::read(&input).unwrap(), b"container bytes");
        assert!(!sidecar_path(&input).exists());
        assert!(!remux_output_path(&input).exists());
    }

    #[cfg(unix)]
    #[test]
    fn failed_rename_removes_remux_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let fake_ffmpeg = dir.path().join("ffmpeg");
        fs::write(
            &fake_ffmpeg,
            "#!/bin/sh\nfor out in \"$@\"; do :; done\nprintf 'remuxed' > \"$out\"\n",
        )
        .unwrap();
        fs::set_permissions(&fake_ffmpeg, fs::Permissions::from_mode(0o755)).unwrap();

        // A directory as the input makes the final rename fail even though
        // the remux itself "succeeded".
        let input = dir.path().join("video.mkv");
        fs::create_dir(&input).unwrap();

        let err = apply_metadata(&fake_ffmpeg, &input, ";FFMETADATA1\n").unwrap_err();
        assert!(matches!(err, FfmpegError::Io(_)));
        assert!(!remux_output_path(&input).exists());
        assert!(!sidecar_path(&input).exists());
    }

    #[cfg(unix)]
    #[test]
    fn successful_remux_replaces_input() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        // Stub that writes its last argument (the remux output) and exits 0.
        let fake_ffmpeg = dir.path().join("ffmpeg");
        fs::write(
            &fake_ffmpeg,
            "#!/bin/sh\nfor out in \"$@\"; do :; done\nprintf 'remuxed' > \"$out\"\n",
        )
        .unwrap();
        fs::set_permissions(&fake_ffmpeg, fs::Permissions::from_mode(0o755)).unwrap();

        let input = dir.path().join("video.mkv");
        fs::write(&input, b"original").unwrap();

        apply_metadata(&fake_ffmpeg, &input, ";FFMETADATA1\n").unwrap();

        assert_eq!(fs::read(&input).unwrap(), b"remuxed");
        assert!(!sidecar_path(&input).exists());
        assert!(!remux_output_path(&input).exists());
    }
}
