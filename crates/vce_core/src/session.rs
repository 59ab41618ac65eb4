//! One open file's editing session.
//!
//! An `EditSession` holds everything a single open file needs: the raw
//! metadata dump it was opened with (the encode baseline), the working
//! chapter list, and the probed duration. Edits mutate the in-memory list
//! only; nothing is persisted until an explicit `save`. Closing a file is
//! just dropping the session.
//!
//! Sessions are single-threaded and synchronous; concurrent editing of
//! multiple files means one independent session per file.

use std::path::{Path, PathBuf};

use crate::chapters::{self, Chapter, ChapterResult};
use crate::ffmpeg::{self, FfmpegResult};

/// Editing state for one open video file.
#[derive(Debug, Clone)]
pub struct EditSession {
    file: PathBuf,
    /// The dump retrieved when the file was opened (or last saved). Encode
    /// splices the edited chapters into this text so non-chapter metadata
    /// survives the round trip.
    raw_metadata: String,
    chapters: Vec<Chapter>,
    video_length_ms: i64,
    dirty: bool,
}

impl EditSession {
    /// Open a file: dump its metadata, decode chapters, probe the duration.
    pub fn open(ffmpeg: &Path, ffprobe: &Path, file: impl Into<PathBuf>) -> FfmpegResult<Self> {
        let file = file.into();
        let raw_metadata = ffmpeg::read_metadata(ffmpeg, &file)?;
        let video_length_ms = ffmpeg::probe_duration_ms(ffprobe, &file)?;
        let chapters = chapters::decode(&raw_metadata);

        tracing::info!(
            "Opened {} with {} chapters ({} ms)",
            file.display(),
            chapters.len(),
            video_length_ms
        );

        Ok(Self {
            file,
            raw_metadata,
            chapters,
            video_length_ms,
            dirty: false,
        })
    }

    /// Build a session from an already-fetched metadata dump.
    ///
    /// Used when the host (e.g. a player that knows the duration) performs
    /// the tool calls itself.
    pub fn from_metadata(
        file: impl Into<PathBuf>,
        raw_metadata: impl Into<String>,
        video_length_ms: i64,
    ) -> Self {
        let raw_metadata = raw_metadata.into();
        let chapters = chapters::decode(&raw_metadata);
        Self {
            file: file.into(),
            raw_metadata,
            chapters,
            video_length_ms,
            dirty: false,
        }
    }

    /// Path of the open file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Current chapter list, in edit order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Best-known total duration of the file in milliseconds.
    pub fn video_length_ms(&self) -> i64 {
        self.video_length_ms
    }

    /// Whether the list has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Insert a chapter at the given playback position.
    pub fn insert_chapter(&mut self, start_ms: i64, title: &str) {
        self.chapters = chapters::insert_at(&self.chapters, start_ms, title, self.video_length_ms);
        self.dirty = true;
    }

    /// Delete the chapter at the given position.
    pub fn delete_chapter(&mut self, index: usize) -> ChapterResult<()> {
        self.chapters = chapters::delete_at(&self.chapters, index)?;
        self.dirty = true;
        Ok(())
    }

    /// Shift every chapter by a signed millisecond offset.
    pub fn shift_chapters(&mut self, offset_ms: i64) {
        if offset_ms == 0 {
            return;
        }
        self.chapters = chapters::shift(&self.chapters, offset_ms);
        self.dirty = true;
    }

    /// Encode the current list against the retained dump.
    ///
    /// Chapters are sorted by start before encoding; the codec writes them
    /// in exactly the order it is given.
    pub fn encoded_metadata(&self) -> String {
        let mut sorted = self.chapters.clone();
        sorted.sort_by_key(|c| c.start);
        chapters::encode(&sorted, &self.raw_metadata)
    }

    /// Persist the edited chapters back into the container.
    ///
    /// On success the encoded text becomes the new baseline, so a
    /// subsequent save starts from the state just written.
    pub fn save(&mut self, ffmpeg: &Path) -> FfmpegResult<()> {
        let encoded = self.encoded_metadata();
        ffmpeg::apply_metadata(ffmpeg, &self.file, &encoded)?;

        self.raw_metadata = encoded;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\
;FFMETADATA1
encoder=Lavf61.7.100
[CHAPTER]
TIMEBASE=1/1000
START=5000
END=10000
title=Middle
";

    fn session() -> EditSession {
        EditSession::from_metadata("/videos/movie.mkv", DUMP, 20000)
    }

    #[test]
    fn open_decodes_existing_chapters() {
        let session = session();
        assert_eq!(session.chapters().len(), 1);
        assert_eq!(session.chapters()[0].title, "Middle");
        assert!(!session.is_dirty());
    }

    #[test]
    fn insert_marks_dirty_and_updates_list() {
        let mut session = session();
        session.insert_chapter(1000, "Opening");

        assert!(session.is_dirty());
        assert_eq!(session.chapters().len(), 2);
        assert_eq!(session.chapters()[0].title, "Opening");
        assert_eq!(session.chapters()[0].end, 5000);
    }

    #[test]
    fn insert_past_last_chapter_uses_probed_duration() {
        let mut session = session();
        session.insert_chapter(15000, "Credits");

        let tail = session.chapters().last().unwrap();
        assert_eq!(tail.start, 15000);
        assert_eq!(tail.end, 20000);
    }

    #[test]
    fn delete_propagates_index_errors() {
        let mut session = session();
        assert!(session.delete_chapter(5).is_err());
        assert!(!session.is_dirty());

        session.delete_chapter(0).unwrap();
        assert!(session.chapters().is_empty());
        assert!(session.is_dirty());
    }

    #[test]
    fn shift_zero_does_not_mark_dirty() {
        let mut session = session();
        session.shift_chapters(0);
        assert!(!session.is_dirty());

        session.shift_chapters(-1000);
        assert!(session.is_dirty());
        assert_eq!(session.chapters()[0].start, 4000);
    }

    #[test]
    fn encoded_metadata_sorts_and_preserves_header() {
        let mut session = session();
        // Inserted before the existing chapter; list stays sorted, but the
        // encode path must not rely on that.
        session.insert_chapter(1000, "Opening");

        let encoded = session.encoded_metadata();
        assert!(encoded.starts_with(";FFMETADATA1\nencoder=Lavf61.7.100\n"));

        let opening = encoded.find("title=Opening").unwrap();
        let middle = encoded.find("title=Middle").unwrap();
        assert!(opening < middle);
    }

    #[test]
    fn encoded_metadata_round_trips_through_decoder() {
        let mut session = session();
        session.insert_chapter(1000, "Opening");
        session.insert_chapter(12000, "Ending");

        let decoded = crate::chapters::decode(&session.encoded_metadata());
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].title, "Opening");
        assert_eq!(decoded[1].title, "Middle");
        assert_eq!(decoded[2].title, "Ending");
    }
}
