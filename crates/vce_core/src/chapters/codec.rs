//! ffmetadata chapter codec.
//!
//! Converts between ffmpeg's line-oriented `ffmetadata` dump format and an
//! in-memory chapter list, and back. The dump looks like:
//!
//! ```text
//! ;FFMETADATA1
//! encoder=Lavf61.7.100
//! [CHAPTER]
//! TIMEBASE=1/1000000000
//! START=1000000
//! END=2268000000000
//! title=The Start
//! ```
//!
//! Decoding normalizes all timestamps to milliseconds regardless of the
//! source timebase. Encoding strips the existing chapter sections from the
//! original dump, preserves every other line byte-for-byte, and appends the
//! edited list in the `1/1000` timebase the remux step expects.

use super::types::{Chapter, MILLISECOND_TIMEBASE};

/// Section marker line that opens a chapter block.
const CHAPTER_MARKER: &str = "[CHAPTER]";

/// Fields accumulated while scanning one `[CHAPTER]` section.
#[derive(Debug, Default)]
struct PartialChapter {
    timebase_seen: bool,
    start: Option<i64>,
    end: Option<i64>,
}

/// Decoder state, consumed one input line at a time.
enum ScanState {
    /// Between sections, or inside a non-chapter section.
    Outside,
    /// Inside a `[CHAPTER]` section that has not been completed by a
    /// `title=` line yet. `factor` converts source-timebase values to
    /// milliseconds.
    InChapter {
        partial: PartialChapter,
        factor: f64,
    },
}

/// Decode a raw ffmetadata dump into a chapter list.
///
/// Chapters are returned in file order; the decoder does not re-sort.
/// Malformed sections (a new bracketed section before `title=` completed
/// the record) are dropped silently, so decoding never fails -- empty or
/// structurally odd input only yields a shorter list.
pub fn decode(raw: &str) -> Vec<Chapter> {
    let mut chapters = Vec::new();
    let mut state = ScanState::Outside;

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed == CHAPTER_MARKER {
            // Each section starts over with an identity conversion factor
            // until a TIMEBASE= line says otherwise.
            state = ScanState::InChapter {
                partial: PartialChapter::default(),
                factor: 1.0,
            };
            continue;
        }

        let ScanState::InChapter { partial, factor } = &mut state else {
            continue;
        };

        if let Some(value) = trimmed.strip_prefix("TIMEBASE=") {
            if let Some((num, den)) = value.split_once('/') {
                // A part that parses to 0 would zero out (or blow up) the
                // factor; it gets the same fallback as a failed parse.
                let numerator = parse_timebase_part(num);
                let denominator = parse_timebase_part(den);
                *factor = denominator as f64 / 1000.0 / numerator as f64;
            }
            partial.timebase_seen = true;
        } else if let Some(value) = trimmed.strip_prefix("START=") {
            if let Ok(raw_start) = value.parse::<i64>() {
                partial.start = Some(to_millis(raw_start, *factor));
            }
        } else if let Some(value) = trimmed.strip_prefix("END=") {
            if let Ok(raw_end) = value.parse::<i64>() {
                partial.end = Some(to_millis(raw_end, *factor));
            }
        } else if let Some(title) = trimmed.strip_prefix("title=") {
            // The title line completes the section, but only once every
            // required field has been seen.
            if partial.timebase_seen && !title.is_empty() {
                if let (Some(start), Some(end)) = (partial.start, partial.end) {
                    chapters.push(Chapter::new(start, end, title));
                    state = ScanState::Outside;
                }
            }
        } else if trimmed.starts_with('[') {
            // A new section opened before the chapter was complete: the
            // partial record is dropped.
            state = ScanState::Outside;
        }
    }

    chapters
}

/// Convert a source-timebase value to the nearest integer millisecond.
fn to_millis(raw: i64, factor: f64) -> i64 {
    (raw as f64 / factor).round() as i64
}

/// Parse one side of a `TIMEBASE=N/D` rational, falling back to 1 for
/// anything unusable (including 0, which no valid timebase contains).
fn parse_timebase_part(s: &str) -> i64 {
    s.parse::<i64>().ok().filter(|&v| v != 0).unwrap_or(1)
}

/// Encode a chapter list back into ffmetadata text.
///
/// Every existing chapter section in `original` is stripped (marker line
/// through to, but not including, the next bracketed marker or blank line);
/// all other lines are preserved byte-for-byte in their original order. The
/// edited chapters are then appended in list order, always in the `1/1000`
/// timebase. Callers that care about output ordering must sort by start
/// first; no invariant checks are performed here.
pub fn encode(chapters: &[Chapter], original: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut skipping = false;

    for line in original.split('\n') {
        if line.trim() == CHAPTER_MARKER {
            skipping = true;
            continue;
        }

        if skipping && (line.starts_with('[') || line.trim().is_empty()) {
            skipping = false;
        }

        if !skipping {
            kept.push(line);
        }
    }

    // Trailing blank lines would stack up behind the guaranteed final
    // newline (and accumulate across edit cycles), so they go.
    while kept.last().is_some_and(|line| line.trim().is_empty()) {
        kept.pop();
    }

    let mut out = kept.join("\n");
    out.push('\n');

    for chapter in chapters {
        out.push_str("\n[CHAPTER]\n");
        out.push_str(&format!("TIMEBASE={}\n", MILLISECOND_TIMEBASE));
        out.push_str(&format!("START={}\n", chapter.start));
        out.push_str(&format!("END={}\n", chapter.end));
        out.push_str(&format!("title={}\n", chapter.title));
    }

    out
}
