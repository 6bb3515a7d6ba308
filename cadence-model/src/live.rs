use crate::tree::{ComponentTree, NodeIndex};
use cadence_types::Identifier;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A shared handle to a live component tree.
///
/// Clones share the same tree. Equality is identity: two handles are equal
/// iff they point at the same allocation.
#[derive(Clone)]
pub struct LiveComponent(Arc<RwLock<ComponentTree>>);

impl LiveComponent {
    pub fn new(tree: ComponentTree) -> Self {
        Self(Arc::new(RwLock::new(tree)))
    }

    /// Read access. A poisoned lock is recovered, not propagated.
    pub fn read(&self) -> RwLockReadGuard<'_, ComponentTree> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ComponentTree> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The identity marker of the root node.
    pub fn identifier(&self) -> Option<Identifier> {
        self.read().root_node().identity.clone()
    }

    /// Identity marker of any node.
    pub fn identifier_of(&self, node: NodeIndex) -> Option<Identifier> {
        self.read().node(node).and_then(|n| n.identity.clone())
    }

    pub fn name(&self) -> String {
        self.read().root_node().name.clone()
    }

    /// Independent deep copy of the current tree.
    pub fn snapshot(&self) -> ComponentTree {
        self.read().clone()
    }
}

impl From<ComponentTree> for LiveComponent {
    fn from(tree: ComponentTree) -> Self {
        Self::new(tree)
    }
}

impl PartialEq for LiveComponent {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for LiveComponent {}

impl fmt::Debug for LiveComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.read();
        let root = tree.root_node();
        f.debug_struct("LiveComponent")
            .field("name", &root.name)
            .field("identity", &root.identity)
            .field("nodes", &tree.node_count())
            .finish()
    }
}
