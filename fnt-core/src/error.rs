//! Error types for font decoding and measurement.

use std::fmt;

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of failures surfaced by the decoders and the metrics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input was empty or otherwise unusable.
    InvalidArgument,
    /// The format detector could not classify the input.
    UnrecognizedFormat,
    /// Structurally malformed payload: wrong magic, wrong version,
    /// missing required attribute, unexpected block type.
    InvalidFormat,
    /// A declared length exceeds the remaining input.
    TruncatedData,
    /// Measurement referenced a codepoint the font does not define.
    MissingCharacter,
    /// File I/O failure while loading a descriptor.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::UnrecognizedFormat => write!(f, "unrecognized format"),
            Self::InvalidFormat => write!(f, "invalid format"),
            Self::TruncatedData => write!(f, "truncated data"),
            Self::MissingCharacter => write!(f, "missing character"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error produced while decoding a font descriptor or measuring text.
///
/// Every error is fatal to the call that raised it: decoders do not
/// retry or partially recover, and a failed decode leaves the target
/// font in an unspecified state that callers should discard.
#[derive(Debug, Clone)]
pub struct FontError {
    /// Machine-readable category.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl FontError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FontError {}

/// Convenience type alias for results using [`FontError`].
pub type FontResult<T> = Result<T, FontError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FontError::new(ErrorKind::InvalidFormat, "bad magic");
        let s = format!("{err}");
        assert!(s.contains("invalid format"), "missing kind: {s}");
        assert!(s.contains("bad magic"), "missing message: {s}");
    }

    #[test]
    fn kind_display_is_lowercase_prose() {
        assert_eq!(format!("{}", ErrorKind::TruncatedData), "truncated data");
        assert_eq!(
            format!("{}", ErrorKind::UnrecognizedFormat),
            "unrecognized format"
        );
    }
}
