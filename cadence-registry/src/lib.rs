//! Registry of live Cadence components.
//!
//! A [`Registry`] is an explicit context object: create one, register live
//! components in it, resolve them by [`Identifier`](cadence_types::Identifier),
//! and tear it down when done. Nested components are found through their
//! containers. Misses fall back to an [`ObjectCache`].

mod cache;
mod config;
mod error;
mod registry;

pub use cache::{CacheError, CachedObject, MemoryCache, NoCache, ObjectCache};
pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use registry::{Registry, ResolutionSource, ResolvedComponent};
