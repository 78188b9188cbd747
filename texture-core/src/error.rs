//! Error types for corpus access and transformation
//!
//! Configuration problems are reported eagerly when a source is bound or a
//! policy is built. Content problems (unreadable files, tokenizer failures)
//! surface lazily on first access to the offending item.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while binding, configuring or reading a corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Empty or ambiguous source, or an invalid policy combination
    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    /// A file-backed item could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tokenizer collaborator rejected an item
    #[error("tokenization failed for '{label}': {source}")]
    Tokenization {
        label: String,
        #[source]
        source: TokenizeError,
    },

    /// Item index past the end of the corpus
    #[error("index {index} out of range for corpus of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// A wrapper received content it cannot work with
    #[error("item '{label}' has the wrong content shape: expected {expected}")]
    ContentShape { label: String, expected: &'static str },
}

impl CorpusError {
    /// Shorthand for a configuration failure
    pub fn config(reason: impl Into<String>) -> Self {
        CorpusError::Configuration {
            reason: reason.into(),
        }
    }
}

/// Failure reported by a tokenizer collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TokenizeError {
    message: String,
}

impl TokenizeError {
    /// Create a tokenizer failure with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by a record parser collaborator
///
/// Never aborts iteration: the extractor logs it and substitutes an empty
/// record sequence for the item.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Raw content is not in the format the parser understands
    #[error("malformed input in '{label}': {reason}")]
    Malformed { label: String, reason: String },

    /// JSON decoding failed
    #[error("invalid JSON in '{label}': {source}")]
    Json {
        label: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = CorpusError::config("source is empty");
        assert_eq!(err.to_string(), "invalid configuration: source is empty");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = CorpusError::Io {
            path: PathBuf::from("/missing/file.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("/missing/file.txt"));

        let source = std::error::Error::source(&err).unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_tokenization_display() {
        let err = CorpusError::Tokenization {
            label: "first.txt".to_string(),
            source: TokenizeError::new("bad input"),
        };
        assert_eq!(
            err.to_string(),
            "tokenization failed for 'first.txt': bad input"
        );
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = CorpusError::IndexOutOfRange { index: 7, len: 4 };
        assert_eq!(
            err.to_string(),
            "index 7 out of range for corpus of 4 items"
        );
    }
}
