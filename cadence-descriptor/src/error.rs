//! Error types for descriptor parsing and class resolution.

use cadence_document::DocumentError;
use thiserror::Error;

/// Result type for descriptor operations.
pub type DescriptorResult<T> = Result<T, DescriptorError>;

#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The document is not a valid component descriptor.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("identifier error: {0}")]
    Identifier(#[from] cadence_types::Error),

    #[error(transparent)]
    ClassResolution(#[from] ClassResolutionError),
}

impl DescriptorError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }
}

/// One failed resolution strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub message: String,
}

/// Every resolution strategy failed for a class.
///
/// `causes` holds one entry per strategy that ran, in the order they ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "could not resolve class '{class_name}' (searched {search_hint}): {}",
    render_causes(.causes)
)]
pub struct ClassResolutionError {
    pub class_name: String,
    pub search_hint: String,
    pub causes: Vec<StrategyFailure>,
}

fn render_causes(causes: &[StrategyFailure]) -> String {
    causes
        .iter()
        .enumerate()
        .map(|(i, cause)| format!("[{}] {}: {}", i + 1, cause.strategy, cause.message))
        .collect::<Vec<_>>()
        .join("; ")
}
