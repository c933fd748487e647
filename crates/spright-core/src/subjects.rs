//! Subject registry and line-number renumbering.
//!
//! Subjects are the addressable elements of a document: sheets, inputs and sprites. The
//! registry stores one [`Handle`] per subject and hands out opaque [`SubjectId`]s, so callers
//! never keep a line number that could go stale. Every structural edit of the line array must
//! be followed by [`SubjectRegistry::renumber`] or [`SubjectRegistry::forget_lines`].

use crate::lines::ConfigLine;
use std::fmt;
use std::ops::Range;

/// A line-number reference to a subject line.
///
/// `line_no() == None` is the sentinel position before the first line, used by the synthetic
/// default sheet of documents without an explicit `sheet` line. It orders before every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    line_no: Option<usize>,
}

impl Handle {
    /// The sentinel handle positioned before the first line.
    pub const ROOT: Handle = Handle { line_no: None };

    /// A handle referencing line `line_no`.
    pub fn at(line_no: usize) -> Self {
        Self {
            line_no: Some(line_no),
        }
    }

    /// Referenced line, or `None` for [`Handle::ROOT`].
    pub fn line_no(self) -> Option<usize> {
        self.line_no
    }

    /// Returns `true` for [`Handle::ROOT`].
    pub fn is_root(self) -> bool {
        self.line_no.is_none()
    }

    /// Shift the handle by `delta` if it references a line after `after`.
    fn shift(&mut self, after: Option<usize>, delta: isize) {
        if let Some(line_no) = self.line_no
            && self.line_no > after
        {
            self.line_no = Some(line_no.saturating_add_signed(delta));
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_no {
            Some(line_no) => write!(f, "line {line_no}"),
            None => f.write_str("root"),
        }
    }
}

/// The kind of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    /// A `sheet` line (top-level only).
    Sheet,
    /// An `input` line.
    Input,
    /// A `sprite` line belonging to the most recent input.
    Sprite,
}

impl SubjectKind {
    /// The definition token that introduces this kind of subject.
    pub fn token(self) -> &'static str {
        match self {
            Self::Sheet => "sheet",
            Self::Input => "input",
            Self::Sprite => "sprite",
        }
    }
}

/// Opaque identifier of a registered subject, never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubjectId(u32);

#[derive(Debug, Clone)]
struct SubjectEntry {
    id: SubjectId,
    kind: SubjectKind,
    handle: Handle,
    parent: Option<SubjectId>,
}

/// Ordered registry of the subjects of one document.
#[derive(Debug, Clone, Default)]
pub struct SubjectRegistry {
    /// Entries in document order.
    entries: Vec<SubjectEntry>,
    next_id: u32,
}

impl SubjectRegistry {
    /// Build the registry with a single forward pass over `lines`.
    pub fn scan(lines: &[ConfigLine]) -> Self {
        let mut registry = Self::default();
        let has_sheet = lines
            .iter()
            .any(|line| line.indent_level == 0 && line.definition == "sheet");
        let mut sheet = (!has_sheet).then(|| registry.push(SubjectKind::Sheet, Handle::ROOT, None));
        let mut input = None;

        for (line_no, line) in lines.iter().enumerate() {
            let handle = Handle::at(line_no);
            match line.definition.as_str() {
                "sheet" if line.indent_level == 0 => {
                    sheet = Some(registry.push(SubjectKind::Sheet, handle, None));
                }
                "input" => {
                    input = Some(registry.push(SubjectKind::Input, handle, sheet));
                }
                "sprite" => {
                    if let Some(input) = input {
                        registry.push(SubjectKind::Sprite, handle, Some(input));
                    }
                }
                _ => {}
            }
        }
        registry
    }

    fn push(&mut self, kind: SubjectKind, handle: Handle, parent: Option<SubjectId>) -> SubjectId {
        let id = SubjectId(self.next_id);
        self.next_id += 1;
        self.entries.push(SubjectEntry {
            id,
            kind,
            handle,
            parent,
        });
        id
    }

    fn entry(&self, id: SubjectId) -> Option<&SubjectEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn of_kind(&self, kind: SubjectKind) -> impl Iterator<Item = SubjectId> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.kind == kind)
            .map(|entry| entry.id)
    }

    /// Sheets in document order (including the synthetic root sheet, if any).
    pub fn sheets(&self) -> impl Iterator<Item = SubjectId> + '_ {
        self.of_kind(SubjectKind::Sheet)
    }

    /// Inputs in document order.
    pub fn inputs(&self) -> impl Iterator<Item = SubjectId> + '_ {
        self.of_kind(SubjectKind::Input)
    }

    /// Sprites of `input` in document order.
    pub fn sprites(&self, input: SubjectId) -> impl Iterator<Item = SubjectId> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.kind == SubjectKind::Sprite && entry.parent == Some(input))
            .map(|entry| entry.id)
    }

    /// Current handle of `id`, or `None` if the subject was removed.
    pub fn handle(&self, id: SubjectId) -> Option<Handle> {
        self.entry(id).map(|entry| entry.handle)
    }

    /// Kind of `id`.
    pub fn kind(&self, id: SubjectId) -> Option<SubjectKind> {
        self.entry(id).map(|entry| entry.kind)
    }

    /// Owning subject: the enclosing sheet of an input, the input of a sprite.
    pub fn parent(&self, id: SubjectId) -> Option<SubjectId> {
        self.entry(id).and_then(|entry| entry.parent)
    }

    /// Returns `true` if `id` is still registered.
    pub fn contains(&self, id: SubjectId) -> bool {
        self.entry(id).is_some()
    }

    /// Number of registered subjects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no subject is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a subject for a line inserted by a local edit.
    ///
    /// Call this after [`renumber`](Self::renumber) for the insertion, so the new handle is not
    /// shifted itself.
    pub fn register(&mut self, kind: SubjectKind, handle: Handle, parent: Option<SubjectId>) -> SubjectId {
        let id = SubjectId(self.next_id);
        self.next_id += 1;
        let index = self
            .entries
            .iter()
            .position(|entry| entry.handle > handle)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            index,
            SubjectEntry {
                id,
                kind,
                handle,
                parent,
            },
        );
        id
    }

    /// Shift every handle referencing a line after `after` by `delta`.
    ///
    /// `after == None` shifts every non-root handle. This must run for every structural edit,
    /// including edits inside a subtree no handle references directly.
    pub fn renumber(&mut self, after: Option<usize>, delta: isize) {
        for entry in &mut self.entries {
            entry.handle.shift(after, delta);
        }
    }

    /// Account for the deletion of `lines`: subjects on deleted lines are dropped, later
    /// subjects move up.
    pub fn forget_lines(&mut self, lines: Range<usize>) {
        if lines.is_empty() {
            return;
        }
        let removed: Vec<SubjectId> = self
            .entries
            .iter()
            .filter(|entry| entry.handle.line_no().is_some_and(|n| lines.contains(&n)))
            .map(|entry| entry.id)
            .collect();
        self.entries.retain(|entry| !removed.contains(&entry.id));
        // Orphaned children of a removed subject lose their owner link.
        for entry in &mut self.entries {
            if entry.parent.is_some_and(|parent| removed.contains(&parent)) {
                entry.parent = None;
            }
        }

        let count = lines.len() as isize;
        let after = lines.start.checked_sub(1);
        for entry in &mut self.entries {
            if entry.handle.line_no().is_some_and(|n| n >= lines.end) {
                entry.handle.shift(after, -count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::split_lines;

    fn line_nos(registry: &SubjectRegistry) -> Vec<Option<usize>> {
        registry.entries.iter().map(|e| e.handle.line_no()).collect()
    }

    #[test]
    fn test_renumber_skips_root_and_earlier_lines() {
        let lines = split_lines("input a\n  sprite\ninput b\n  sprite");
        let mut registry = SubjectRegistry::scan(&lines);
        assert_eq!(line_nos(&registry), [None, Some(0), Some(1), Some(2), Some(3)]);

        registry.renumber(Some(1), 2);
        assert_eq!(line_nos(&registry), [None, Some(0), Some(1), Some(4), Some(5)]);

        registry.renumber(None, 1);
        assert_eq!(line_nos(&registry), [None, Some(1), Some(2), Some(5), Some(6)]);
    }

    #[test]
    fn test_forget_lines_drops_and_shifts() {
        let lines = split_lines("sheet\n  input a\n    sprite\n  input b\n    sprite");
        let mut registry = SubjectRegistry::scan(&lines);
        let input_a = registry.inputs().next().unwrap();
        let sprite_a = registry.sprites(input_a).next().unwrap();

        registry.forget_lines(1..2);
        assert!(!registry.contains(input_a));
        assert_eq!(registry.parent(sprite_a), None);
        assert_eq!(line_nos(&registry), [Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_register_keeps_document_order() {
        let lines = split_lines("input a\ninput b");
        let mut registry = SubjectRegistry::scan(&lines);
        let input_a = registry.inputs().next().unwrap();
        registry.renumber(Some(0), 1);
        let sprite = registry.register(SubjectKind::Sprite, Handle::at(1), Some(input_a));

        assert_eq!(line_nos(&registry), [None, Some(0), Some(1), Some(2)]);
        assert_eq!(registry.sprites(input_a).collect::<Vec<_>>(), [sprite]);
        assert_eq!(Handle::at(1).to_string(), "line 1");
        assert_eq!(Handle::ROOT.to_string(), "root");
    }
}
