//! Chapter types and error definitions.
//!
//! Provides the value type for a single chapter marker and the errors
//! that can occur during chapter editing operations.

use serde::{Deserialize, Serialize};

/// The normalized timebase every decoded chapter carries: milliseconds.
pub const MILLISECOND_TIMEBASE: &str = "1/1000";

/// A single chapter marker with timing and a display title.
///
/// Times are always in milliseconds from the start of the file, regardless
/// of the timebase the source container used. This is also the wire shape
/// exchanged with the host UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Inclusive start offset in milliseconds. Always >= 0.
    pub start: i64,
    /// End offset in milliseconds. By convention the start of the next
    /// chapter, or the file duration for the last one.
    pub end: i64,
    /// Display title. Never empty; the decoder drops sections without one.
    pub title: String,
    /// Rational timebase string, always `"1/1000"` in decoded form.
    pub timebase: String,
}

impl Chapter {
    /// Create a new chapter with the normalized millisecond timebase.
    pub fn new(start: i64, end: i64, title: impl Into<String>) -> Self {
        Self {
            start,
            end,
            title: title.into(),
            timebase: MILLISECOND_TIMEBASE.to_string(),
        }
    }

    /// Length of the chapter in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }
}

/// Errors that can occur during chapter editing operations.
///
/// Decoding and encoding never fail; structurally odd input only ever
/// produces a shorter chapter list.
#[derive(Debug, thiserror::Error)]
pub enum ChapterError {
    /// An editing operation was handed an index past the end of the list.
    #[error("chapter index {index} out of bounds (list has {len} chapters)")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Type alias for chapter operation results.
pub type ChapterResult<T> = Result<T, ChapterError>;

/// Format a millisecond offset as zero-padded `HH:MM:SS.mmm`.
///
/// Negative input normalizes to `"00:00:00.000"` rather than failing.
pub fn format_milliseconds_to_time(ms: i64) -> String {
    if ms < 0 {
        return "00:00:00.000".to_string();
    }

    let total_secs = ms / 1000;
    let millis = ms % 1000;

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}
