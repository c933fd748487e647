//! Synchronization options.
//!
//! Options are plain data with serde support so hosts can load them from their own settings
//! file (JSON, camelCase keys). Missing keys fall back to the defaults.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options resolved once per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncOptions {
    /// Indentation added below a space-indented (or unindented) subject with no children yet.
    pub indent_unit: String,
    /// Indentation added below a tab-indented subject with no children yet.
    pub tab_indent_unit: String,
    /// Cell size/count written when an input is switched to a grid type.
    pub grid_cell_size: [u32; 2],
    /// Quiet period before pending model edits are pushed to the buffer.
    pub commit_debounce_ms: u64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            indent_unit: "  ".to_string(),
            tab_indent_unit: "\t".to_string(),
            grid_cell_size: [16, 16],
            commit_debounce_ms: 250,
        }
    }
}

impl SyncOptions {
    /// Parse options from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The debounce delay as a [`Duration`](std::time::Duration).
    pub fn commit_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.commit_debounce_ms)
    }
}
