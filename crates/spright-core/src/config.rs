//! Property resolution and mutation on top of the line model.
//!
//! [`Config`] owns the line array and the [`SubjectRegistry`]. Reads come in three flavours:
//! - *direct*: an immediate child line of the subject (`has_property`, `property_parameters`)
//! - *common*: a line of an enclosing, shallower scope (`has_common_property`, ...)
//! - *effective*: direct, falling back to common
//!
//! Writes insert, rewrite or delete lines and renumber all subject handles in the same call.

use crate::error::Result;
use crate::lines::{self, ConfigLine};
use crate::options::SyncOptions;
use crate::outline::Outline;
use crate::params::ParameterList;
use crate::subjects::{Handle, SubjectId, SubjectKind, SubjectRegistry};
use std::ops::Range;
use tracing::trace;

/// How the sprites of an input are laid out in its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// The input is a single sprite (or lists its sprites explicitly).
    Sprite,
    /// Sprites are detected automatically.
    Atlas,
    /// Fixed cell size, row by row.
    Grid,
    /// Fixed cell size, column by column.
    GridVertical,
    /// Fixed cell count, row by row.
    GridCells,
    /// Fixed cell count, column by column.
    GridCellsVertical,
}

impl InputType {
    /// Property kinds in lookup priority order.
    pub const PROPERTY_KINDS: [InputType; 5] = [
        Self::Atlas,
        Self::Grid,
        Self::GridVertical,
        Self::GridCells,
        Self::GridCellsVertical,
    ];

    /// The definition token of this type.
    pub fn token(self) -> &'static str {
        match self {
            Self::Sprite => "sprite",
            Self::Atlas => "atlas",
            Self::Grid => "grid",
            Self::GridVertical => "grid-vertical",
            Self::GridCells => "grid-cells",
            Self::GridCellsVertical => "grid-cells-vertical",
        }
    }

    /// Parse a definition token.
    pub fn from_token(token: &str) -> Option<Self> {
        std::iter::once(Self::Sprite)
            .chain(Self::PROPERTY_KINDS)
            .find(|ty| ty.token() == token)
    }

    /// Parameters written when an input is switched to this type.
    pub fn default_parameters(self, options: &SyncOptions) -> ParameterList {
        match self {
            Self::Grid | Self::GridVertical | Self::GridCells | Self::GridCellsVertical => {
                options.grid_cell_size.iter().map(u32::to_string).collect()
            }
            Self::Sprite | Self::Atlas => ParameterList::new(),
        }
    }
}

/// In-memory model of one configuration document.
///
/// # Example
///
/// ```rust
/// use spright_core::Config;
///
/// let mut config = Config::parse("input \"a.png\"\n  sprite");
/// let input = config.inputs().next().unwrap();
/// config.set_property(input, "grid", &["16", "16"]);
/// assert_eq!(config.source(), "input \"a.png\"\n  grid 16 16\n  sprite");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    lines: Vec<ConfigLine>,
    subjects: SubjectRegistry,
    options: SyncOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self::parse("")
    }
}

impl Config {
    /// Parse `source` (`\n`-separated) with default options.
    pub fn parse(source: &str) -> Self {
        Self::with_options(source, SyncOptions::default())
    }

    /// Parse `source` (`\n`-separated).
    pub fn with_options(source: &str, options: SyncOptions) -> Self {
        let lines = lines::split_lines(source);
        let subjects = SubjectRegistry::scan(&lines);
        Self {
            lines,
            subjects,
            options,
        }
    }

    /// Parse raw bytes, failing only if they are not UTF-8.
    pub fn from_utf8(bytes: &[u8], options: SyncOptions) -> Result<Self> {
        let source = std::str::from_utf8(bytes)?;
        Ok(Self::with_options(source, options))
    }

    /// Serialize the model back to `\n`-separated text.
    pub fn source(&self) -> String {
        lines::serialize_lines(&self.lines)
    }

    /// All lines.
    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Options used for new lines.
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// The subject registry.
    pub fn subjects(&self) -> &SubjectRegistry {
        &self.subjects
    }

    /// Sheets in document order.
    pub fn sheets(&self) -> impl Iterator<Item = SubjectId> + '_ {
        self.subjects.sheets()
    }

    /// Inputs in document order.
    pub fn inputs(&self) -> impl Iterator<Item = SubjectId> + '_ {
        self.subjects.inputs()
    }

    /// Sprites of `input` in document order.
    pub fn sprites(&self, input: SubjectId) -> impl Iterator<Item = SubjectId> + '_ {
        self.subjects.sprites(input)
    }

    /// Line currently referenced by `subject`.
    pub fn line_no(&self, subject: SubjectId) -> Option<usize> {
        self.subjects.handle(subject).and_then(Handle::line_no)
    }

    /// Hierarchical outline of the document.
    pub fn outline(&self) -> Outline {
        Outline::from_lines(&self.lines)
    }

    fn subject_line(&self, subject: SubjectId) -> Option<&ConfigLine> {
        self.line_no(subject).and_then(|n| self.lines.get(n))
    }

    /// Lines below `handle` up to the next definition at the same or a shallower level.
    ///
    /// Comment and blank lines inside that range belong to the subject, except for a trailing
    /// run that is not indented deeper than the subject itself.
    fn subtree(&self, handle: Handle) -> Range<usize> {
        let Some(line_no) = handle.line_no() else {
            return 0..self.lines.len();
        };
        let level = self.lines[line_no].indent_level;
        let mut end = self.lines[line_no + 1..]
            .iter()
            .position(|line| line.is_definition() && line.indent_level <= level)
            .map_or(self.lines.len(), |i| line_no + 1 + i);
        while end > line_no + 1 && !self.lines[end - 1].is_nested_deeper_than(level) {
            end -= 1;
        }
        line_no + 1..end
    }

    fn find_property_line_no(&self, handle: Handle, definition: &str) -> Option<usize> {
        let mut child_level: Option<usize> = None;
        for i in self.subtree(handle) {
            let line = &self.lines[i];
            if !line.is_definition() {
                continue;
            }
            if child_level.is_none_or(|level| line.indent_level <= level) {
                child_level = Some(line.indent_level);
                if line.definition == definition {
                    return Some(i);
                }
            }
        }
        None
    }

    fn find_common_property_line_no(&self, handle: Handle, definition: &str) -> Option<usize> {
        let line_no = handle.line_no()?;
        let mut below_level = self.lines[line_no].indent_level;
        for i in (0..line_no).rev() {
            let parent = &self.lines[i];
            if parent.is_definition() && parent.indent_level < below_level {
                if parent.definition == definition {
                    return Some(i);
                }
                below_level = parent.indent_level + 1;
            }
        }
        None
    }

    fn property_line_no(&self, subject: SubjectId, definition: &str) -> Option<usize> {
        let handle = self.subjects.handle(subject)?;
        self.find_property_line_no(handle, definition)
    }

    fn common_property_line_no(&self, subject: SubjectId, definition: &str) -> Option<usize> {
        let handle = self.subjects.handle(subject)?;
        self.find_common_property_line_no(handle, definition)
    }

    /// Returns `true` if `subject` has a direct `definition` child.
    pub fn has_property(&self, subject: SubjectId, definition: &str) -> bool {
        self.property_line_no(subject, definition).is_some()
    }

    /// Parameters of the direct `definition` child, if present.
    pub fn property_parameters(&self, subject: SubjectId, definition: &str) -> Option<ParameterList> {
        self.property_line_no(subject, definition)
            .map(|i| self.lines[i].parameters())
    }

    /// Returns `true` if an enclosing scope sets `definition`.
    pub fn has_common_property(&self, subject: SubjectId, definition: &str) -> bool {
        self.common_property_line_no(subject, definition).is_some()
    }

    /// Parameters of the nearest enclosing `definition` line, if any.
    pub fn common_property_parameters(
        &self,
        subject: SubjectId,
        definition: &str,
    ) -> Option<ParameterList> {
        self.common_property_line_no(subject, definition)
            .map(|i| self.lines[i].parameters())
    }

    /// Returns `true` if the property is set directly or inherited.
    pub fn has_effective_property(&self, subject: SubjectId, definition: &str) -> bool {
        self.has_property(subject, definition) || self.has_common_property(subject, definition)
    }

    /// Direct parameters, falling back to inherited ones.
    pub fn effective_property_parameters(
        &self,
        subject: SubjectId,
        definition: &str,
    ) -> Option<ParameterList> {
        self.property_parameters(subject, definition)
            .or_else(|| self.common_property_parameters(subject, definition))
    }

    /// Parameters on the subject's own line (e.g. an input's filename).
    pub fn subject_parameters(&self, subject: SubjectId) -> Option<ParameterList> {
        self.subject_line(subject).map(ConfigLine::parameters)
    }

    /// A single parameter on the subject's own line.
    pub fn subject_parameter(&self, subject: SubjectId, index: usize) -> Option<String> {
        self.subject_parameters(subject)?.into_iter().nth(index)
    }

    /// Rewrite the parameters on the subject's own line.
    pub fn set_subject_parameters<S: AsRef<str>>(&mut self, subject: SubjectId, parameters: &[S]) -> bool {
        let Some(line_no) = self.line_no(subject) else {
            return false;
        };
        self.lines[line_no].set_parameters(parameters);
        true
    }

    /// Column just after the subject's definition token.
    pub fn parameter_column(&self, subject: SubjectId) -> Option<usize> {
        self.subject_line(subject)
            .map(|line| line.indent_level + line.definition.len() + 1)
    }

    fn child_indent(&self, handle: Handle) -> String {
        let Some(line_no) = handle.line_no() else {
            return String::new();
        };
        if let Some(child) = self
            .subtree(handle)
            .map(|i| &self.lines[i])
            .find(|line| line.is_definition())
        {
            return child.indent().to_string();
        }
        let indent = self.lines[line_no].indent();
        let unit = if indent.contains('\t') {
            &self.options.tab_indent_unit
        } else {
            &self.options.indent_unit
        };
        format!("{indent}{unit}")
    }

    fn insert_property<S: AsRef<str>>(&mut self, handle: Handle, definition: &str, parameters: &[S]) -> usize {
        let indent = self.child_indent(handle);
        let index = handle.line_no().map_or(0, |n| n + 1);
        self.lines
            .insert(index, ConfigLine::new(&indent, definition, parameters));
        self.subjects.renumber(handle.line_no(), 1);
        trace!(line = index, definition, "inserted property");
        index
    }

    fn remove_lines(&mut self, range: Range<usize>) {
        trace!(?range, "removing lines");
        self.lines.drain(range.clone());
        self.subjects.forget_lines(range);
    }

    /// Set a direct property, rewriting its line in place or inserting it as the first child.
    ///
    /// Returns `false` if `subject` is unknown.
    pub fn set_property<S: AsRef<str>>(&mut self, subject: SubjectId, definition: &str, parameters: &[S]) -> bool {
        let Some(handle) = self.subjects.handle(subject) else {
            return false;
        };
        match self.find_property_line_no(handle, definition) {
            Some(i) => self.lines[i].set_parameters(parameters),
            None => {
                self.insert_property(handle, definition, parameters);
            }
        }
        true
    }

    /// Delete the direct `definition` child. Returns `false` if there was none.
    pub fn remove_property(&mut self, subject: SubjectId, definition: &str) -> bool {
        match self.property_line_no(subject, definition) {
            Some(i) => {
                self.remove_lines(i..i + 1);
                true
            }
            None => false,
        }
    }

    /// Delete the subject's whole subtree, plus one blank line directly after it.
    ///
    /// The synthetic root sheet cannot be cleared. Returns `false` if nothing was removed.
    pub fn clear_subject(&mut self, subject: SubjectId) -> bool {
        let Some(handle) = self.subjects.handle(subject).filter(|h| !h.is_root()) else {
            return false;
        };
        let mut range = self.subtree(handle);
        if self.lines.get(range.end).is_some_and(ConfigLine::is_blank) {
            range.end += 1;
        }
        if range.is_empty() {
            return false;
        }
        self.remove_lines(range);
        true
    }

    /// Delete the subject's subtree and its own line.
    pub fn remove_subject(&mut self, subject: SubjectId) -> bool {
        let Some(line_no) = self.line_no(subject) else {
            return false;
        };
        self.clear_subject(subject);
        self.remove_lines(line_no..line_no + 1);
        true
    }

    /// Layout type of `input`: the first direct type property in priority order, then the
    /// first inherited one, else [`InputType::Sprite`].
    pub fn input_type(&self, input: SubjectId) -> InputType {
        InputType::PROPERTY_KINDS
            .into_iter()
            .find(|ty| self.has_property(input, ty.token()))
            .or_else(|| {
                InputType::PROPERTY_KINDS
                    .into_iter()
                    .find(|ty| self.has_common_property(input, ty.token()))
            })
            .unwrap_or(InputType::Sprite)
    }

    /// Switch `input` to another layout type.
    ///
    /// Grid types are written with their default cell size. A parameterless `atlas` line is
    /// only written when the input already lists sprites, and a bare `sprite` line only when it
    /// lists none. The previous type's direct property is removed, except for the sprite lines
    /// of an input listing more than one. Returns `false` if nothing changed.
    pub fn replace_input_type(&mut self, input: SubjectId, new_type: InputType) -> bool {
        let Some(handle) = self
            .subjects
            .handle(input)
            .filter(|_| self.subjects.kind(input) == Some(SubjectKind::Input))
        else {
            return false;
        };
        let current = self.input_type(input);
        if current == new_type {
            return false;
        }

        let sprite_count = self.subjects.sprites(input).count();
        let parameters = new_type.default_parameters(&self.options);
        let mut changed = false;
        match new_type {
            InputType::Sprite if sprite_count == 0 => {
                let index = self.insert_property(handle, new_type.token(), &parameters);
                self.subjects
                    .register(SubjectKind::Sprite, Handle::at(index), Some(input));
                changed = true;
            }
            InputType::Sprite => {}
            _ if parameters.is_empty() && sprite_count == 0 => {}
            _ => match self.find_property_line_no(handle, new_type.token()) {
                Some(i) => {
                    let before = self.lines[i].text.clone();
                    self.lines[i].set_parameters(&parameters);
                    changed = self.lines[i].text != before;
                }
                None => {
                    self.insert_property(handle, new_type.token(), &parameters);
                    changed = true;
                }
            },
        }

        if current != InputType::Sprite || sprite_count == 1 {
            changed |= self.remove_property(input, current.token());
        }
        changed
    }

    /// Display id of a sprite: its line parameter, else its effective `id` property, else
    /// `"sprite"`.
    pub fn sprite_id(&self, sprite: SubjectId) -> String {
        self.subject_parameter(sprite, 0)
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.effective_property_parameters(sprite, "id")
                    .and_then(|params| params.into_iter().next())
            })
            .unwrap_or_else(|| "sprite".to_string())
    }

    /// Replace the id written on a sprite's own line.
    pub fn replace_sprite_id(&mut self, sprite: SubjectId, id: &str) -> bool {
        self.set_subject_parameters(sprite, &[id])
    }
}
