//! Error types for unitext.

use thiserror::Error;

/// Result type alias for unitext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for unitext operations.
///
/// Lookups that simply find nothing (a pattern that does not match, a read
/// past the end) are reported as `None` by the APIs that perform them, not
/// as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An index or range resolved outside the valid bounds of the text.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    /// An edit would leave half of a surrogate pair behind.
    #[error("code unit offset {offset} splits a codepoint")]
    CodepointBoundaryViolation { offset: usize },
    /// The pattern text could not be compiled.
    #[error("invalid pattern: {0}")]
    PatternSyntax(String),
    /// The text was modified while it is the subject of an active scan.
    #[error("text is busy: cannot modify it while it is being scanned")]
    ConcurrentMutation,
    /// A value is not a Unicode scalar value.
    #[error("invalid codepoint U+{0:04X}")]
    InvalidCodepoint(u32),
    /// A malformed escape sequence at the given byte offset.
    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),
    /// No charset is known under this label.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
}

impl Error {
    pub(crate) fn out_of_range(index: isize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::out_of_range(-7, 6);
        assert!(err.to_string().contains("-7"));
        assert!(err.to_string().contains("length 6"));

        let err = Error::CodepointBoundaryViolation { offset: 3 };
        assert!(err.to_string().contains("offset 3"));

        let err = Error::InvalidCodepoint(0xD800);
        assert_eq!(err.to_string(), "invalid codepoint U+D800");
    }

    #[test]
    fn test_concurrent_mutation_is_distinguishable() {
        let err = Error::ConcurrentMutation;
        assert!(matches!(err, Error::ConcurrentMutation));
        assert_ne!(err, Error::PatternSyntax(String::new()));
    }
}
