//! Core type definitions for Cadence.
//!
//! This crate defines the fundamental identity type shared by the document,
//! model, descriptor and registry crates:
//! - [`Identifier`], a versioned component name (authority, namespace,
//!   object number, revision number)
//!
//! Exact equality compares every field. Family equality ignores the
//! revision, so "all versions of X" can be addressed with one key.

mod ids;

pub use ids::{DEFAULT_AUTHORITY, Identifier, LSID_SCHEME};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed identifier '{input}': {reason}")]
    MalformedIdentifier { input: String, reason: String },
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
