//! Indentation-leveled line model.
//!
//! A document is kept as a flat `Vec<ConfigLine>`; the index into that vector is the line
//! number. Hierarchy is implicit: a line belongs to the nearest preceding line with a smaller
//! indent level. Comment and blank lines carry the level of the previous defining line forward,
//! so they never open or close a scope.

use crate::params::{self, ParameterList};

/// A single line of a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLine {
    /// Raw line text (no trailing newline).
    pub text: String,
    /// Number of leading space/tab characters, or the inherited level for comment/blank lines.
    pub indent_level: usize,
    /// First word on the line (`sheet`, `input`, `grid`, ...); empty for comment/blank lines.
    pub definition: String,
}

fn index_of_non_space(line: &str) -> Option<usize> {
    line.find(|c: char| c != ' ' && c != '\t')
}

fn index_of_space(line: &str, from: usize) -> usize {
    line[from..]
        .find([' ', '\t'])
        .map_or(line.len(), |i| from + i)
}

impl ConfigLine {
    /// Build a definition line from its parts.
    pub fn new<S: AsRef<str>>(indent: &str, definition: &str, parameters: &[S]) -> Self {
        let mut line = Self {
            text: format!("{indent}{definition}"),
            indent_level: indent.len(),
            definition: definition.to_string(),
        };
        line.set_parameters(parameters);
        line
    }

    /// Returns `true` if this line opens a definition (not a comment or blank line).
    pub fn is_definition(&self) -> bool {
        !self.definition.is_empty()
    }

    /// Returns `true` if the line contains only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns `true` if the line is a definition, or a non-blank line whose actual
    /// whitespace exceeds `level`.
    pub fn is_nested_deeper_than(&self, level: usize) -> bool {
        self.is_definition()
            || index_of_non_space(&self.text).is_some_and(|begin| begin > level)
    }

    /// Leading indentation of a definition line.
    ///
    /// For comment/blank lines the inherited level may exceed the actual whitespace; only the
    /// whitespace that is really present is returned.
    pub fn indent(&self) -> &str {
        let whitespace = self
            .text
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(self.text.len());
        &self.text[..whitespace.min(self.indent_level)]
    }

    fn parameter_text(&self) -> (&str, Option<&str>) {
        if !self.is_definition() {
            return ("", None);
        }
        let rest = &self.text[self.indent_level + self.definition.len()..];
        params::split_trailing_comment(rest.trim_start())
    }

    /// Parameters following the definition, without any trailing comment.
    pub fn parameters(&self) -> ParameterList {
        params::parse_parameters(self.parameter_text().0)
    }

    /// Rewrite the parameters in place, keeping indentation, definition and trailing comment.
    ///
    /// Comment and blank lines are left untouched.
    pub fn set_parameters<S: AsRef<str>>(&mut self, parameters: &[S]) {
        if !self.is_definition() {
            return;
        }
        let comment = self.parameter_text().1.map(str::to_string);
        let mut text = format!("{}{}", self.indent(), self.definition);
        if !parameters.is_empty() {
            text.push(' ');
            text.push_str(&params::format_parameters(parameters));
        }
        if let Some(comment) = comment {
            text.push(' ');
            text.push_str(&comment);
        }
        self.text = text;
    }
}

/// Split `source` into lines, one per `'\n'`.
///
/// `source` is expected to be `\n`-normalized (see [`LineEnding::normalize`](crate::LineEnding::normalize)).
/// Never fails; the empty string yields a single empty line.
pub fn split_lines(source: &str) -> Vec<ConfigLine> {
    let mut prev_level = 0;
    source
        .split('\n')
        .map(|text| {
            let mut level = prev_level;
            let mut definition = "";
            if let Some(begin) = index_of_non_space(text)
                && !text[begin..].starts_with('#')
            {
                definition = &text[begin..index_of_space(text, begin)];
                level = begin;
                prev_level = level;
            }
            ConfigLine {
                text: text.to_string(),
                indent_level: level,
                definition: definition.to_string(),
            }
        })
        .collect()
}

/// Join lines with `'\n'`.
pub fn serialize_lines(lines: &[ConfigLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
