use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while synchronizing a configuration document.
///
/// Property lookups and mutations never fail; a missing subject or property is reported
/// through `Option`/`bool` return values instead.
pub enum SyncError {
    #[error("parsing configuration failed: {0}")]
    /// The buffer did not contain valid UTF-8 text.
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("invalid options: {0}")]
    /// A [`SyncOptions`](crate::SyncOptions) document could not be deserialized.
    Options(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("patch range {start}..{end} is outside the buffer ({len} chars)")]
    /// A patch was resolved against a buffer it does not fit.
    PatchOutOfRange {
        /// Start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
        /// Buffer length in characters.
        len: usize,
    },
}

/// Result alias used across `spright-core`.
pub type Result<T> = std::result::Result<T, SyncError>;
