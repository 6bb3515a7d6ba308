//! Cache collaborator consulted when a lookup misses the in-memory registry.

use cadence_model::{ComponentDescriptor, LiveComponent};
use cadence_types::Identifier;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("cached object {id} is unreadable: {message}")]
    Corrupt { id: Identifier, message: String },
}

/// What a cache can hand back: a ready instance, or a descriptor the
/// registry materializes itself.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedObject {
    Live(LiveComponent),
    Descriptor(ComponentDescriptor),
}

/// Persistent object store behind the registry.
///
/// Implementations own their storage; the registry only reads through this
/// interface and never writes back.
pub trait ObjectCache: Send + Sync {
    fn get_exact(&self, id: &Identifier) -> Result<Option<CachedObject>, CacheError>;

    /// The stored member of `id`'s family with the greatest revision.
    fn get_highest_revision(&self, id: &Identifier) -> Result<Option<CachedObject>, CacheError>;
}

/// A cache that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ObjectCache for NoCache {
    fn get_exact(&self, _id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        Ok(None)
    }

    fn get_highest_revision(&self, _id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        Ok(None)
    }
}

/// In-process cache keyed by identifier.
#[derive(Debug, Default)]
pub struct MemoryCache {
    objects: RwLock<BTreeMap<Identifier, CachedObject>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: Identifier, object: CachedObject) -> Option<CachedObject> {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, object)
    }

    /// Stores a descriptor under its own actor identifier.
    pub fn insert_descriptor(&self, descriptor: ComponentDescriptor) -> Option<CachedObject> {
        self.insert(
            descriptor.actor_id().clone(),
            CachedObject::Descriptor(descriptor),
        )
    }

    /// Stores a live component under its root identity marker. Components
    /// without one are not stored.
    pub fn insert_live(&self, component: LiveComponent) -> Option<CachedObject> {
        let id = component.identifier()?;
        self.insert(id, CachedObject::Live(component))
    }

    pub fn remove(&self, id: &Identifier) -> Option<CachedObject> {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectCache for MemoryCache {
    fn get_exact(&self, id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        Ok(objects.get(id).cloned())
    }

    fn get_highest_revision(&self, id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        // Keys sort by revision within a family, so the last match is the highest.
        Ok(objects
            .iter()
            .rev()
            .find(|(key, _)| key.equals_family(id))
            .map(|(_, object)| object.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(revision: u64) -> ComponentDescriptor {
        ComponentDescriptor::new(
            "c",
            "org.example.C",
            "ptolemy.kernel.ComponentEntity",
            Identifier::local("actor", 5, revision),
        )
    }

    #[test]
    fn highest_revision_picks_last_family_member() {
        let cache = MemoryCache::new();
        for revision in [2, 9, 4] {
            cache.insert_descriptor(descriptor(revision));
        }
        cache.insert_descriptor(ComponentDescriptor::new(
            "other",
            "org.example.C",
            "ptolemy.kernel.ComponentEntity",
            Identifier::local("actor", 6, 50),
        ));
        let found = cache
            .get_highest_revision(&Identifier::local("actor", 5, 0))
            .unwrap();
        match found {
            Some(CachedObject::Descriptor(d)) => assert_eq!(d.actor_id().revision(), 9),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn no_cache_always_misses() {
        let id = Identifier::local("actor", 1, 1);
        assert_eq!(NoCache.get_exact(&id), Ok(None));
        assert_eq!(NoCache.get_highest_revision(&id), Ok(None));
    }
}
