//! Live text buffers.
//!
//! [`TextBuffer`] is the seam to the host editor: the synchronization layer reads the buffer's
//! *current* text when it computes a patch and hands back exactly one [`DocumentPatch`].
//! [`RopeBuffer`] is a headless implementation with a caret and a linear undo history in
//! which every applied patch is a single step.

use crate::error::{Result, SyncError};
use crate::line_ending::LineEnding;
use crate::patch::DocumentPatch;
use ropey::Rope;
use std::ops::Range;

/// A text buffer the synchronization layer can read and patch.
pub trait TextBuffer {
    /// Current full text, using the buffer's own separator.
    fn text(&self) -> String;

    /// The buffer's separator.
    fn line_ending(&self) -> LineEnding {
        LineEnding::detect_in_text(&self.text())
    }

    /// Apply `patch` as one atomic edit.
    fn apply_patch(&mut self, patch: &DocumentPatch) -> Result<()>;
}

#[derive(Debug, Clone)]
struct UndoStep {
    start: usize,
    deleted_text: String,
    inserted_text: String,
    caret_before: usize,
}

impl UndoStep {
    fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }
}

/// Move `offset` across the replacement of `start..old_end` by `inserted_len` characters.
fn shift_anchor(offset: usize, start: usize, old_end: usize, inserted_len: usize) -> usize {
    if offset <= start {
        offset
    } else if offset >= old_end {
        offset - (old_end - start) + inserted_len
    } else {
        start + inserted_len
    }
}

/// A rope-backed buffer with a caret and undo/redo.
///
/// # Example
///
/// ```rust
/// use spright_core::{RopeBuffer, TextBuffer};
///
/// let mut buffer = RopeBuffer::new("a\nb");
/// buffer.replace(2..3, "c").unwrap();
/// assert_eq!(buffer.text(), "a\nc");
/// assert!(buffer.undo());
/// assert_eq!(buffer.text(), "a\nb");
/// ```
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
    line_ending: LineEnding,
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    max_undo: usize,
    version: u64,
    caret: usize,
}

impl RopeBuffer {
    /// Create a buffer; the separator is detected from `text`.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            line_ending: LineEnding::detect_in_text(text),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo: 1000,
            version: 0,
            caret: 0,
        }
    }

    /// Override the detected separator.
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Incremented on every change, including undo/redo.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Caret offset in characters.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the buffer.
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.len_chars());
    }

    /// Number of undoable steps.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable steps.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    fn splice(&mut self, start: usize, deleted_len: usize, inserted: &str) {
        let old_end = start + deleted_len;
        self.rope.remove(start..old_end);
        self.rope.insert(start, inserted);
        self.caret = shift_anchor(self.caret, start, old_end, inserted.chars().count());
        self.version += 1;
    }

    /// Replace the character range `range` with `text`, recording one undo step.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        let len = self.len_chars();
        if range.start > range.end || range.end > len {
            return Err(SyncError::PatchOutOfRange {
                start: range.start,
                end: range.end,
                len,
            });
        }

        let step = UndoStep {
            start: range.start,
            deleted_text: self.rope.slice(range.clone()).to_string(),
            inserted_text: text.to_string(),
            caret_before: self.caret,
        };
        self.splice(range.start, range.len(), text);

        self.redo_stack.clear();
        if self.undo_stack.len() >= self.max_undo {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(step);
        Ok(())
    }

    /// Revert the last step. Returns `false` if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(step) = self.undo_stack.pop() else {
            return false;
        };
        self.splice(step.start, step.inserted_len(), &step.deleted_text);
        self.caret = step.caret_before.min(self.len_chars());
        self.redo_stack.push(step);
        true
    }

    /// Re-apply the last undone step. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        let Some(step) = self.redo_stack.pop() else {
            return false;
        };
        self.splice(step.start, step.deleted_len(), &step.inserted_text);
        self.undo_stack.push(step);
        true
    }
}

impl TextBuffer for RopeBuffer {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    fn apply_patch(&mut self, patch: &DocumentPatch) -> Result<()> {
        let range = patch.char_range(&self.text(), self.line_ending)?;
        self.replace(range, &patch.new_text)
    }
}
