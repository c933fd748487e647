//! Line ending helpers.
//!
//! The line model works on `'\n'`-separated text. Buffers keep whatever separator the file was
//! written with; the separator is detected once per document and used when splitting the live
//! text and when joining patch lines.

use std::borrow::Cow;

/// The newline sequence of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
    /// Classic Mac CR (`'\r'`).
    Cr,
}

impl LineEnding {
    /// Detect the line ending from the first line break in `text`.
    ///
    /// Policy: whichever of `'\n'` and `'\r'` occurs first decides; a `'\r'` directly followed by
    /// `'\n'` is [`LineEnding::Crlf`]. Text without line breaks is [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        match text.find(['\n', '\r']) {
            Some(i) if text[i..].starts_with("\r\n") => Self::Crlf,
            Some(i) if text[i..].starts_with('\r') => Self::Cr,
            _ => Self::Lf,
        }
    }

    /// The separator string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Split `text` into lines at this separator (N separators yield N+1 lines).
    pub fn split(self, text: &str) -> Vec<&str> {
        text.split(self.as_str()).collect()
    }

    /// Convert text using this separator to LF.
    pub fn normalize(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Lf => Cow::Borrowed(text),
            _ => Cow::Owned(text.replace(self.as_str(), "\n")),
        }
    }

    /// Convert an LF-separated text to this line ending.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            _ => text.replace('\n', self.as_str()),
        }
    }
}
