//! Chapter processing module.
//!
//! This module handles decoding, editing, and re-encoding of chapter
//! markers in ffmpeg's `ffmetadata` dump format.
//!
//! # Features
//!
//! - **Decoding**: Parse a raw ffmetadata dump into an ordered chapter list
//! - **Editing**: Insert at a playback position, delete, uniform time-shift
//! - **Encoding**: Splice the edited list back into the original dump,
//!   preserving every non-chapter line
//! - **Formatting**: Millisecond offsets as `HH:MM:SS.mmm` display text
//!
//! # Usage
//!
//! ```ignore
//! use vce_core::chapters::{decode, encode, insert_at};
//!
//! // Decode the dump retrieved from ffmpeg
//! let chapters = decode(&raw_metadata);
//!
//! // Add a marker at the current playback position
//! let chapters = insert_at(&chapters, 4000, "Intro", duration_ms);
//!
//! // Re-encode against the original dump for remuxing
//! let updated = encode(&chapters, &raw_metadata);
//! ```

mod codec;
mod editor;
mod types;

// Re-export types
pub use types::{
    format_milliseconds_to_time, Chapter, ChapterError, ChapterResult, MILLISECOND_TIMEBASE,
};

// Re-export functions
pub use codec::{decode, encode};
pub use editor::{delete_at, insert_at, shift};
