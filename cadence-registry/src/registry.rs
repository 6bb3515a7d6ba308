use crate::cache::{CachedObject, NoCache, ObjectCache};
use crate::config::RegistryConfig;
use crate::error::RegistryError;
use cadence_descriptor::{TypeCatalog, TypeResolver, materialize};
use cadence_model::{LiveComponent, NodeIndex};
use cadence_types::Identifier;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, trace, warn};

/// Where a resolved component came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Memory,
    Cache,
}

/// A successful lookup: the instance holding the match, the matching node
/// within it, and the identifier it matched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    pub instance: LiveComponent,
    pub node: NodeIndex,
    pub identifier: Identifier,
    pub source: ResolutionSource,
}

impl ResolvedComponent {
    /// Whether the match is the top-level node of `instance`.
    pub fn is_top_level(&self) -> bool {
        self.node == NodeIndex::ROOT
    }
}

#[derive(Clone, Copy)]
enum Lookup {
    Exact,
    HighestRevision,
}

/// Identifier-indexed registry of live components.
///
/// Top-level entries are keyed by their identifier at registration time.
/// Lookups also find nested components by their identity markers, and fall
/// back to the cache collaborator on a miss.
///
/// One mutex guards the entry map. Searches and marker repairs run while
/// holding it; the cache is consulted after it is released.
pub struct Registry {
    entries: Mutex<BTreeMap<Identifier, LiveComponent>>,
    cache: Arc<dyn ObjectCache>,
    resolver: Arc<dyn TypeResolver>,
    config: RegistryConfig,
}

impl Registry {
    /// Creates an empty registry. Cached descriptors are materialized with
    /// an empty [`TypeCatalog`] until [`with_resolver`](Self::with_resolver)
    /// supplies a real one.
    pub fn create(config: RegistryConfig, cache: Arc<dyn ObjectCache>) -> Self {
        debug!(
            max_search_depth = config.max_search_depth,
            cache_fallback = config.cache_fallback,
            "creating component registry"
        );
        Self {
            entries: Mutex::new(BTreeMap::new()),
            cache,
            resolver: Arc::new(TypeCatalog::new()),
            config,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn TypeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Releases every entry and returns how many there were.
    pub fn teardown(self) -> usize {
        let released = self.clear();
        info!(released, "component registry torn down");
        released
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<Identifier, LiveComponent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Registers `instance` under its root identity marker, replacing any
    /// entry with the same identifier. Returns the replaced entry.
    ///
    /// An instance without a marker is not registered.
    pub fn register(&self, instance: LiveComponent) -> Option<LiveComponent> {
        let Some(id) = instance.identifier() else {
            debug!(name = %instance.name(), "component has no identity marker, not registering");
            return None;
        };

        let mut entries = self.lock();
        let previous = entries.insert(id.clone(), instance);
        if previous.is_none() && entries.len() == self.config.size_warning_threshold {
            warn!(
                entries = entries.len(),
                threshold = self.config.size_warning_threshold,
                "component registry reached its size warning threshold"
            );
        }
        debug!(id = %id, replaced = previous.is_some(), "registered component");
        previous
    }

    /// Removes the entry whose identifier exactly matches `instance`'s.
    pub fn unregister_exact(&self, instance: &LiveComponent) -> Option<LiveComponent> {
        let id = instance.identifier()?;
        let removed = self.lock().remove(&id);
        if removed.is_some() {
            debug!(id = %id, "unregistered component");
        }
        removed
    }

    /// Removes every entry in `instance`'s family, whatever its revision.
    /// Removed entries are returned in identifier order.
    pub fn unregister_family(&self, instance: &LiveComponent) -> Vec<LiveComponent> {
        let Some(id) = instance.identifier() else {
            return Vec::new();
        };
        let mut entries = self.lock();
        let family: Vec<Identifier> = entries
            .keys()
            .filter(|key| key.equals_family(&id))
            .cloned()
            .collect();
        let removed: Vec<LiveComponent> = family
            .iter()
            .filter_map(|key| entries.remove(key))
            .collect();
        debug!(family = %id.to_family_string(), removed = removed.len(), "unregistered component family");
        removed
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let released = entries.len();
        entries.clear();
        released
    }

    // ================================================================
    // Inspection
    // ================================================================

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether a top-level entry is registered under exactly `id`.
    pub fn contains(&self, id: &Identifier) -> bool {
        self.lock().contains_key(id)
    }

    /// Sorted snapshot of the top-level identifiers.
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.lock().keys().cloned().collect()
    }

    /// The top-level entry under exactly `id`. No nested search, no cache.
    pub fn get(&self, id: &Identifier) -> Option<LiveComponent> {
        self.lock().get(id).cloned()
    }

    // ================================================================
    // Resolution
    // ================================================================

    /// Finds the component identified by exactly `id`.
    pub fn resolve_exact(&self, id: &Identifier) -> Option<ResolvedComponent> {
        let found = {
            let entries = self.lock();
            let mut hit = None;
            self.for_each_identified(&entries, |instance, node, identity| {
                if identity == id {
                    hit = Some((instance.clone(), node));
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            hit.map(|(instance, node)| {
                self.repair(&instance, node, id);
                ResolvedComponent {
                    instance,
                    node,
                    identifier: id.clone(),
                    source: ResolutionSource::Memory,
                }
            })
        };

        found.or_else(|| self.resolve_from_cache(id, Lookup::Exact))
    }

    /// Finds the member of `id`'s family with the greatest revision.
    ///
    /// The revision of `id` is ignored. Ties keep the first match in
    /// traversal order.
    pub fn resolve_highest_revision(&self, id: &Identifier) -> Option<ResolvedComponent> {
        let found = {
            let entries = self.lock();
            let mut best: Option<(LiveComponent, NodeIndex, Identifier)> = None;
            self.for_each_identified(&entries, |instance, node, identity| {
                let better = identity.equals_family(id)
                    && best
                        .as_ref()
                        .is_none_or(|(_, _, current)| identity.revision() > current.revision());
                if better {
                    best = Some((instance.clone(), node, identity.clone()));
                }
                ControlFlow::Continue(())
            });
            best.map(|(instance, node, identifier)| {
                self.repair(&instance, node, &identifier);
                ResolvedComponent {
                    instance,
                    node,
                    identifier,
                    source: ResolutionSource::Memory,
                }
            })
        };

        found.or_else(|| self.resolve_from_cache(id, Lookup::HighestRevision))
    }

    /// Visits every identified node reachable from the registry, depth-first:
    /// each top-level entry under its key, then its nested nodes under their
    /// markers. Entries are visited in identifier order.
    fn for_each_identified(
        &self,
        entries: &BTreeMap<Identifier, LiveComponent>,
        mut visit: impl FnMut(&LiveComponent, NodeIndex, &Identifier) -> ControlFlow<()>,
    ) {
        for (key, instance) in entries {
            if visit(instance, NodeIndex::ROOT, key).is_break() {
                return;
            }

            let tree = instance.read();
            let walk = tree.walk(tree.root(), self.config.max_search_depth);
            if !walk.truncated.is_empty() {
                warn!(
                    id = %key,
                    max_depth = self.config.max_search_depth,
                    skipped_subtrees = walk.truncated.len(),
                    "search depth bound reached, deeper components skipped"
                );
            }
            for (index, depth) in walk.visited {
                if depth == 0 {
                    continue;
                }
                let Some(identity) = tree.node(index).and_then(|n| n.identity.as_ref()) else {
                    continue;
                };
                if visit(instance, index, identity).is_break() {
                    return;
                }
            }
        }
    }

    /// Makes `node`'s identity marker agree with `requested`.
    fn repair(&self, instance: &LiveComponent, node: NodeIndex, requested: &Identifier) {
        if !self.config.repair_on_resolve {
            return;
        }
        match instance.identifier_of(node) {
            Some(found) if &found == requested => return,
            Some(found) => {
                let inconsistency = RegistryError::RegistryInconsistency {
                    requested: requested.clone(),
                    found,
                };
                warn!(node = node.index(), "{inconsistency}, overwriting marker");
            }
            None => debug!(id = %requested, node = node.index(), "stamping missing identity marker"),
        }
        if let Some(target) = instance.write().node_mut(node) {
            target.identity = Some(requested.clone());
        }
    }

    fn resolve_from_cache(&self, id: &Identifier, lookup: Lookup) -> Option<ResolvedComponent> {
        if !self.config.cache_fallback {
            return None;
        }

        let fetched = match lookup {
            Lookup::Exact => self.cache.get_exact(id),
            Lookup::HighestRevision => self.cache.get_highest_revision(id),
        };
        let object = match fetched {
            Ok(Some(object)) => object,
            Ok(None) => {
                trace!(id = %id, "cache miss");
                return None;
            }
            Err(e) => {
                let error = RegistryError::from(e);
                warn!(id = %id, "{error}, treating as a miss");
                return None;
            }
        };

        let instance = match object {
            CachedObject::Live(instance) => instance,
            CachedObject::Descriptor(descriptor) => {
                match materialize(&descriptor, self.resolver.as_ref(), None) {
                    Ok(materialized) => materialized.into_detached()?,
                    Err(e) => {
                        warn!(id = %id, error = %e, "cached descriptor could not be materialized");
                        return None;
                    }
                }
            }
        };

        let identifier = match lookup {
            Lookup::Exact => id.clone(),
            Lookup::HighestRevision => instance.identifier().unwrap_or_else(|| id.clone()),
        };
        self.repair(&instance, NodeIndex::ROOT, &identifier);
        debug!(id = %identifier, "resolved component from cache");
        Some(ResolvedComponent {
            instance,
            node: NodeIndex::ROOT,
            identifier,
            source: ResolutionSource::Cache,
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::create(RegistryConfig::default(), Arc::new(NoCache))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
