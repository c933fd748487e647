//! Turning a [`LineRangeDiff`] into a single text edit on the live buffer.
//!
//! The edit replaces the line range `(first, 0)..(last, 0)` with the diff lines joined by the
//! buffer's own separator. Applying the patch makes the buffer's lines equal the proposed lines,
//! including at the end of the buffer:
//! - appending after the last line prepends a separator
//! - the replacement ends with a separator unless it runs to the end of the buffer
//! - a pure deletion running to the end of the buffer also removes the separator before it

use crate::diff::{self, LineRangeDiff};
use crate::error::{Result, SyncError};
use crate::line_ending::LineEnding;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A `(line, column)` position; the column counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in characters.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One replacement over a buffer, in buffer coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    /// Start of the replaced range (inclusive).
    pub start: Position,
    /// End of the replaced range (exclusive).
    pub end: Position,
    /// Replacement text, using the buffer's separator.
    pub new_text: String,
}

fn end_of_line(lines: &[&str], line: usize) -> Position {
    Position::new(line, lines[line].chars().count())
}

/// Start of `line`, clamped to the end of the buffer.
fn line_start(lines: &[&str], line: usize) -> Position {
    if line < lines.len() {
        Position::new(line, 0)
    } else {
        end_of_line(lines, lines.len() - 1)
    }
}

impl DocumentPatch {
    /// Build the edit for `range`, computed against `current` split at `line_ending`.
    pub fn from_range_diff(current: &str, line_ending: LineEnding, range: &LineRangeDiff) -> Self {
        let separator = line_ending.as_str();
        let lines = line_ending.split(current);
        let line_count = lines.len();

        if range.is_deletion() {
            let start = if range.last >= line_count && range.first > 0 {
                end_of_line(&lines, range.first - 1)
            } else {
                line_start(&lines, range.first)
            };
            return Self {
                start,
                end: line_start(&lines, range.last),
                new_text: String::new(),
            };
        }

        let mut new_text = String::new();
        if range.first >= line_count {
            new_text.push_str(separator);
        }
        new_text.push_str(&range.diff.join(separator));
        if range.last < line_count {
            new_text.push_str(separator);
        }
        Self {
            start: line_start(&lines, range.first),
            end: line_start(&lines, range.last),
            new_text,
        }
    }

    /// Resolve the patch to a character range of `text`.
    pub fn char_range(&self, text: &str, line_ending: LineEnding) -> Result<Range<usize>> {
        let lines = line_ending.split(text);
        let separator_len = line_ending.as_str().len();
        let len = text.chars().count();

        let offset = |pos: Position| -> Option<usize> {
            let line = lines.get(pos.line)?;
            if pos.column > line.chars().count() {
                return None;
            }
            let before: usize = lines[..pos.line]
                .iter()
                .map(|l| l.chars().count() + separator_len)
                .sum();
            Some(before + pos.column)
        };

        match (offset(self.start), offset(self.end)) {
            (Some(start), Some(end)) if start <= end => Ok(start..end),
            (start, end) => Err(SyncError::PatchOutOfRange {
                start: start.unwrap_or(len),
                end: end.unwrap_or(len),
                len,
            }),
        }
    }

    /// Apply the patch to `text`, returning the new text.
    pub fn apply_to(&self, text: &str, line_ending: LineEnding) -> Result<String> {
        let range = self.char_range(text, line_ending)?;
        let byte = |char_offset: usize| {
            text.char_indices()
                .nth(char_offset)
                .map_or(text.len(), |(i, _)| i)
        };
        let (start, end) = (byte(range.start), byte(range.end));
        let mut out = String::with_capacity(text.len() - (end - start) + self.new_text.len());
        out.push_str(&text[..start]);
        out.push_str(&self.new_text);
        out.push_str(&text[end..]);
        Ok(out)
    }
}

/// Compute the patch that turns the live buffer text `current` into `proposed`.
///
/// `proposed` is `'\n'`-separated model output; `current` may use any separator. Returns `None`
/// if the buffer already matches.
pub fn compute_patch(current: &str, proposed: &str) -> Option<DocumentPatch> {
    compute_patch_with(current, LineEnding::detect_in_text(current), proposed)
}

/// Like [`compute_patch`], with the buffer's separator already known.
pub fn compute_patch_with(
    current: &str,
    line_ending: LineEnding,
    proposed: &str,
) -> Option<DocumentPatch> {
    let current_lines = line_ending.split(current);
    let proposed_lines: Vec<&str> = proposed.split('\n').collect();
    let range = diff::differing_range(&current_lines, &proposed_lines)?;
    Some(DocumentPatch::from_range_diff(current, line_ending, &range))
}
