//! Chapter set editing operations.
//!
//! Pure functions over a caller-owned chapter list: every operation returns
//! a new list and leaves the input untouched. Ordering and coverage
//! invariants (starts ascending, consecutive chapters touching at their
//! boundaries) hold after every operation except deletion, which may leave
//! a gap by design.

use super::types::{Chapter, ChapterError, ChapterResult};

/// Insert a new chapter starting at `new_start` milliseconds.
///
/// Exactly one chapter is added per call:
///
/// - into an empty list, spanning to `video_length_ms`;
/// - before the first chapter, spanning up to its start;
/// - inside an existing chapter (inclusive of both boundaries), splitting
///   it: the containing chapter is truncated to `new_start - 1` and the new
///   chapter takes over its original end;
/// - otherwise appended at the tail, spanning to `video_length_ms`.
///
/// At most one existing chapter is modified (the split case). Inserting at
/// exactly a chapter's end keeps the inclusive-boundary behavior, which can
/// truncate the containing chapter to a degenerate length.
pub fn insert_at(
    list: &[Chapter],
    new_start: i64,
    title: impl Into<String>,
    video_length_ms: i64,
) -> Vec<Chapter> {
    let title = title.into();

    if list.is_empty() {
        return vec![Chapter::new(new_start, video_length_ms, title)];
    }

    if new_start < list[0].start {
        let mut result = Vec::with_capacity(list.len() + 1);
        result.push(Chapter::new(new_start, list[0].start, title));
        result.extend(list.iter().cloned());
        return result;
    }

    if let Some(index) = list
        .iter()
        .position(|c| c.start <= new_start && new_start <= c.end)
    {
        let mut result = Vec::with_capacity(list.len() + 1);
        for (i, chapter) in list.iter().enumerate() {
            if i == index {
                let mut truncated = chapter.clone();
                truncated.end = new_start - 1;
                result.push(truncated);
                result.push(Chapter::new(new_start, chapter.end, title.clone()));
            } else {
                result.push(chapter.clone());
            }
        }
        return result;
    }

    // Past the last chapter's end: append at the tail.
    let mut result = list.to_vec();
    result.push(Chapter::new(new_start, video_length_ms, title));
    result
}

/// Remove the chapter at the given ordinal position.
///
/// The resulting gap in coverage is not re-merged with neighbors. An
/// out-of-range index is the only hard failure in the chapter core.
pub fn delete_at(list: &[Chapter], index: usize) -> ChapterResult<Vec<Chapter>> {
    if index >= list.len() {
        return Err(ChapterError::IndexOutOfBounds {
            index,
            len: list.len(),
        });
    }

    let mut result = list.to_vec();
    result.remove(index);
    Ok(result)
}

/// Shift every chapter by a signed millisecond offset.
///
/// Timestamps are clamped at zero rather than going negative. A zero
/// offset returns the list unchanged.
pub fn shift(list: &[Chapter], offset_ms: i64) -> Vec<Chapter> {
    if offset_ms == 0 {
        return list.to_vec();
    }

    tracing::debug!("Shifting {} chapters by {}ms", list.len(), offset_ms);

    list.iter()
        .map(|chapter| {
            let mut shifted = chapter.clone();
            shifted.start = (chapter.start.saturating_add(offset_ms)).max(0);
            shifted.end = (chapter.end.saturating_add(offset_ms)).max(0);
            shifted
        })
        .collect()
}
