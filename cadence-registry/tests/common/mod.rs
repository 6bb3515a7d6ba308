//! Shared helpers for registry tests.

#![allow(dead_code)]

use cadence_model::{ComponentKind, ComponentNode, ComponentTree, LiveComponent};
use cadence_registry::{CacheError, CachedObject, ObjectCache};
use cadence_types::Identifier;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Routes `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn id(namespace: &str, object: u64, revision: u64) -> Identifier {
    Identifier::local(namespace, object, revision)
}

pub fn atomic_node(name: &str, identity: Option<Identifier>) -> ComponentNode {
    let mut node = ComponentNode::new(name, "ptolemy.actor.lib.Const", ComponentKind::Atomic);
    node.identity = identity;
    node
}

pub fn composite_node(name: &str, identity: Option<Identifier>) -> ComponentNode {
    let mut node = ComponentNode::new(
        name,
        "ptolemy.actor.TypedCompositeActor",
        ComponentKind::Composite,
    );
    node.identity = identity;
    node
}

/// A single atomic component identified by `identity`.
pub fn component(identity: Identifier) -> LiveComponent {
    LiveComponent::new(ComponentTree::new(atomic_node("actor", Some(identity))))
}

/// A composite identified by `identity` holding one child per entry of
/// `children`, each carrying the given marker.
pub fn composite(identity: Identifier, children: &[Option<Identifier>]) -> LiveComponent {
    let mut tree = ComponentTree::new(composite_node("workflow", Some(identity)));
    let root = tree.root();
    for (i, marker) in children.iter().enumerate() {
        tree.add_child(root, atomic_node(&format!("child{i}"), marker.clone()))
            .unwrap();
    }
    LiveComponent::new(tree)
}

/// A chain of composites `depth` levels deep under the root, the innermost
/// carrying `leaf`.
pub fn chain(identity: Identifier, depth: usize, leaf: Identifier) -> LiveComponent {
    let mut tree = ComponentTree::new(composite_node("level0", Some(identity)));
    let mut parent = tree.root();
    for level in 1..depth {
        parent = tree
            .add_child(parent, composite_node(&format!("level{level}"), None))
            .unwrap();
    }
    tree.add_child(parent, atomic_node("leaf", Some(leaf)))
        .unwrap();
    LiveComponent::new(tree)
}

/// A cache whose backend is always down.
pub struct FailingCache;

impl ObjectCache for FailingCache {
    fn get_exact(&self, _id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        Err(CacheError::Unavailable("disk offline".into()))
    }

    fn get_highest_revision(&self, _id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        Err(CacheError::Unavailable("disk offline".into()))
    }
}

/// A cache that counts lookups and never hits.
#[derive(Default)]
pub struct CountingCache {
    pub lookups: AtomicUsize,
}

impl CountingCache {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ObjectCache for CountingCache {
    fn get_exact(&self, _id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }

    fn get_highest_revision(&self, _id: &Identifier) -> Result<Option<CachedObject>, CacheError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}
