//! Error types for the registry.

use crate::cache::CacheError;
use cadence_types::Identifier;
use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A resolved node's identity marker disagrees with the identifier it
    /// was found under. Logged and repaired, never returned from a lookup.
    #[error("registry inconsistency: requested {requested}, node carries {found}")]
    RegistryInconsistency {
        requested: Identifier,
        found: Identifier,
    },

    /// The cache collaborator failed. Lookups treat this as a miss.
    #[error("cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),

    #[error("invalid registry configuration: {0}")]
    Config(String),
}
