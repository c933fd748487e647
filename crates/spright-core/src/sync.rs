//! Editor synchronization session.
//!
//! A [`DocumentSync`] pairs one live buffer with one [`Config`] model:
//!
//! ```text
//! buffer changed ──► refresh()  ──► rebuild Config (only if the text differs from the model)
//! panel edit     ──► edit()/stage() ──► mutate Config ──► commit()
//! commit()       ──► serialize ──► diff against the buffer's current text ──► one patch
//! ```
//!
//! Everything is synchronous; [`CommitDebounce`] only decides *when* a host should flush
//! staged edits.

use crate::buffer::TextBuffer;
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::line_ending::LineEnding;
use crate::options::SyncOptions;
use crate::patch::{self, DocumentPatch};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Trailing-edge debounce for model edits.
///
/// Each [`touch`](Self::touch) restarts the quiet period; the pending edits are due once no
/// touch happened for `delay`.
#[derive(Debug, Clone)]
pub struct CommitDebounce {
    delay: Duration,
    pending_since: Option<Instant>,
}

impl CommitDebounce {
    /// Create a debounce with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_since: None,
        }
    }

    /// Record an edit at `now`.
    pub fn touch(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    /// Returns `true` if edits are waiting.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Returns `true` if edits are waiting and the quiet period has elapsed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.pending_since
            .is_some_and(|since| now.saturating_duration_since(since) >= self.delay)
    }

    /// Like [`is_due`](Self::is_due), clearing the pending state when it returns `true`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        let due = self.is_due(now);
        if due {
            self.pending_since = None;
        }
        due
    }

    /// Drop pending state.
    pub fn clear(&mut self) {
        self.pending_since = None;
    }
}

/// Synchronization state for one open document.
#[derive(Debug, Clone)]
pub struct DocumentSync {
    config: Config,
    /// `\n`-separated text the model represents.
    synced: Option<String>,
    options: SyncOptions,
    debounce: CommitDebounce,
}

impl DocumentSync {
    /// Create a session with an empty model. Call [`refresh`](Self::refresh) with the buffer
    /// text before editing.
    pub fn new(options: SyncOptions) -> Self {
        Self {
            config: Config::with_options("", options.clone()),
            synced: None,
            debounce: CommitDebounce::new(options.commit_debounce()),
            options,
        }
    }

    /// Create a session already refreshed from `buffer`.
    pub fn attach<B: TextBuffer + ?Sized>(buffer: &B, options: SyncOptions) -> Self {
        let mut sync = Self::new(options);
        sync.refresh(&buffer.text());
        sync
    }

    /// The model.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns `true` if staged edits have not been committed yet.
    pub fn has_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Rebuild the model from the buffer text unless the model already represents it.
    ///
    /// Returns `true` if the model was rebuilt; all previously obtained subject ids are then
    /// invalid. Staged edits are discarded.
    pub fn refresh(&mut self, text: &str) -> bool {
        let normalized = LineEnding::detect_in_text(text).normalize(text);
        if self.synced.as_deref() == Some(&*normalized) {
            return false;
        }
        if self.debounce.is_pending() {
            debug!("external change discards staged edits");
            self.debounce.clear();
        }

        let started = Instant::now();
        self.config = Config::with_options(&normalized, self.options.clone());
        self.synced = Some(normalized.into_owned());
        debug!(
            lines = self.config.line_count(),
            subjects = self.config.subjects().len(),
            elapsed = ?started.elapsed(),
            "rebuilt configuration model"
        );
        true
    }

    /// Like [`refresh`](Self::refresh) for raw buffer bytes.
    ///
    /// Text that is not UTF-8 is logged and skipped; the previous model stays in place.
    pub fn refresh_bytes(&mut self, bytes: &[u8]) -> bool {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.refresh(text),
            Err(err) => {
                warn!(error = %SyncError::from(err), "skipping configuration refresh");
                false
            }
        }
    }

    /// Push the model into `buffer` as one patch against its current text.
    ///
    /// Returns `None` if the buffer already matches the model.
    pub fn commit<B: TextBuffer + ?Sized>(&mut self, buffer: &mut B) -> Result<Option<DocumentPatch>> {
        let proposed = self.config.source();
        let current = buffer.text();
        let patch = patch::compute_patch_with(&current, buffer.line_ending(), &proposed);
        if let Some(patch) = &patch {
            buffer.apply_patch(patch)?;
            debug!(
                start = patch.start.line,
                end = patch.end.line,
                inserted = patch.new_text.len(),
                "patched buffer"
            );
        }
        self.synced = Some(proposed);
        self.debounce.clear();
        Ok(patch)
    }

    /// Mutate the model and commit immediately.
    pub fn edit<B, F, R>(&mut self, buffer: &mut B, f: F) -> Result<(R, Option<DocumentPatch>)>
    where
        B: TextBuffer + ?Sized,
        F: FnOnce(&mut Config) -> R,
    {
        let result = f(&mut self.config);
        let patch = self.commit(buffer)?;
        Ok((result, patch))
    }

    /// Mutate the model and defer the commit until [`flush_due`](Self::flush_due).
    pub fn stage<F, R>(&mut self, now: Instant, f: F) -> R
    where
        F: FnOnce(&mut Config) -> R,
    {
        self.debounce.touch(now);
        f(&mut self.config)
    }

    /// Commit staged edits once the debounce period has elapsed.
    pub fn flush_due<B: TextBuffer + ?Sized>(
        &mut self,
        now: Instant,
        buffer: &mut B,
    ) -> Result<Option<DocumentPatch>> {
        if !self.debounce.take_due(now) {
            return Ok(None);
        }
        self.commit(buffer)
    }
}
