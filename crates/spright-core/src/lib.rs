#![warn(missing_docs)]
//! Spright Core - text/model synchronization for sprite-sheet configuration files
//!
//! # Overview
//!
//! `spright-core` keeps two views of an indentation-structured configuration document in sync:
//! the plain text buffer the user types into, and a structured model a property panel reads
//! and writes. The model is edited line by line, and every change is pushed back into the
//! buffer as the *smallest* contiguous line replacement, so unrelated lines, the caret and the
//! undo history of the host editor are left alone.
//!
//! ```text
//! sheet "atlas"
//!   padding 2                 ← common property, inherited by everything below
//!   input "hero.png"          ← subject (input)
//!     grid 16 16              ← direct property of the input
//!     sprite "idle"           ← subject (sprite)
//! ```
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  DocumentSync (refresh / edit / commit)     │  ← Host-facing API
//! ├─────────────────────────────────────────────┤
//! │  Range diff + DocumentPatch + TextBuffer    │  ← Buffer update
//! ├─────────────────────────────────────────────┤
//! │  Config (property resolver / mutator)       │  ← Model
//! ├─────────────────────────────────────────────┤
//! │  SubjectRegistry (handles, renumbering)     │  ← Addressing
//! ├─────────────────────────────────────────────┤
//! │  Line model + parameter codec               │  ← Text structure
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use spright_core::{DocumentSync, RopeBuffer, SyncOptions, TextBuffer};
//!
//! let mut buffer = RopeBuffer::new("input \"a.png\"\n  sprite\n");
//! let mut sync = DocumentSync::attach(&buffer, SyncOptions::default());
//!
//! let input = sync.config().inputs().next().unwrap();
//! let (_, patch) = sync
//!     .edit(&mut buffer, |config| config.set_property(input, "trim", &["none"]))
//!     .unwrap();
//!
//! assert_eq!(buffer.text(), "input \"a.png\"\n  trim none\n  sprite\n");
//! assert_eq!(patch.unwrap().new_text, "  trim none\n");
//! ```
//!
//! # Module Description
//!
//! - [`params`] - parameter list codec (quoting, tokenizing)
//! - [`lines`] - indentation-leveled line model
//! - [`subjects`] - subject handles and renumbering
//! - [`config`] - property resolver and mutator
//! - [`diff`] - differing line range
//! - [`patch`] - single-edit buffer patches
//! - [`buffer`] - live buffer seam and a rope-backed implementation
//! - [`sync`] - per-document synchronization session
//! - [`line_ending`] - separator detection and normalization
//! - [`outline`] - structural outline for navigation
//! - [`options`] - serde-loadable options

pub mod buffer;
pub mod config;
pub mod diff;
mod error;
pub mod line_ending;
pub mod lines;
pub mod options;
pub mod outline;
pub mod params;
pub mod patch;
pub mod subjects;
pub mod sync;

pub use buffer::{RopeBuffer, TextBuffer};
pub use config::{Config, InputType};
pub use diff::{LineRangeDiff, differing_range};
pub use error::{Result, SyncError};
pub use line_ending::LineEnding;
pub use lines::{ConfigLine, serialize_lines, split_lines};
pub use options::SyncOptions;
pub use outline::{DocumentSymbol, Outline, SymbolKind};
pub use params::{
    Parameter, ParameterList, conditionally_quote, format_parameters, parse_parameters,
    strip_quotes,
};
pub use patch::{DocumentPatch, Position, compute_patch, compute_patch_with};
pub use subjects::{Handle, SubjectId, SubjectKind, SubjectRegistry};
pub use sync::{CommitDebounce, DocumentSync};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
