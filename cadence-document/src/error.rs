//! Error types for document reading.

use thiserror::Error;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while reading a descriptor document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The input ended inside a construct.
    #[error("unexpected end of document while reading {0}")]
    UnexpectedEof(&'static str),

    /// Malformed markup at a byte offset.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A closing tag did not match the open element.
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },

    /// The document has no root element.
    #[error("document has no root element")]
    Empty,
}
