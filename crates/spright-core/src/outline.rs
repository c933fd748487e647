//! Document outline.
//!
//! Structural definitions (`sheet`, `input`, `output`, ...) become hierarchical symbols nested
//! by indentation, so hosts can build an outline tree or a jump list without understanding the
//! rest of the grammar.

use crate::lines::ConfigLine;
use regex::Regex;
use std::sync::LazyLock;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)([a-z][a-z\-]*)[ \t]*(.*)$").expect("valid definition regex")
});

/// A coarse symbol kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    /// `path`, `glob`, `output`, `description`.
    Function,
    /// `input`.
    Field,
    /// `sheet`.
    Variable,
    /// `group`.
    Package,
}

impl SymbolKind {
    /// Kind of a definition token, or `None` if the definition is not structural.
    pub fn from_definition(definition: &str) -> Option<Self> {
        match definition {
            "path" | "glob" | "output" | "description" => Some(Self::Function),
            "input" => Some(Self::Field),
            "sheet" => Some(Self::Variable),
            "group" => Some(Self::Package),
            _ => None,
        }
    }
}

/// A single outline node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSymbol {
    /// Definition token.
    pub name: String,
    /// Rest of the line after the token.
    pub detail: String,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// Line number.
    pub line: usize,
    /// Nested symbols.
    pub children: Vec<DocumentSymbol>,
}

impl DocumentSymbol {
    /// Collect this node and all descendants in pre-order.
    pub fn flatten_preorder<'a>(&'a self, out: &mut Vec<&'a DocumentSymbol>) {
        out.push(self);
        for child in &self.children {
            child.flatten_preorder(out);
        }
    }
}

/// A document outline (top-level symbol list).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline {
    /// Top-level symbols.
    pub symbols: Vec<DocumentSymbol>,
}

impl Outline {
    /// Build the outline of `lines`.
    pub fn from_lines(lines: &[ConfigLine]) -> Self {
        let mut roots = Vec::new();
        let mut scopes: Vec<(DocumentSymbol, usize)> = Vec::new();

        for (line_no, line) in lines.iter().enumerate() {
            let Some(caps) = DEFINITION.captures(&line.text) else {
                continue;
            };
            let Some(kind) = SymbolKind::from_definition(&caps[2]) else {
                continue;
            };
            let level = caps[1].len();
            while scopes.last().is_some_and(|(_, top)| *top >= level) {
                close_scope(&mut scopes, &mut roots);
            }
            scopes.push((
                DocumentSymbol {
                    name: caps[2].to_string(),
                    detail: caps[3].to_string(),
                    kind,
                    line: line_no,
                    children: Vec::new(),
                },
                level,
            ));
        }
        while !scopes.is_empty() {
            close_scope(&mut scopes, &mut roots);
        }
        Self { symbols: roots }
    }

    /// Returns true if there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Flatten all symbols in pre-order.
    pub fn flatten_preorder(&self) -> Vec<&DocumentSymbol> {
        let mut out = Vec::new();
        for sym in &self.symbols {
            sym.flatten_preorder(&mut out);
        }
        out
    }
}

fn close_scope(scopes: &mut Vec<(DocumentSymbol, usize)>, roots: &mut Vec<DocumentSymbol>) {
    let Some((symbol, _)) = scopes.pop() else {
        return;
    };
    match scopes.last_mut() {
        Some((parent, _)) => parent.children.push(symbol),
        None => roots.push(symbol),
    }
}
