//! Live component arena.
//!
//! A [`ComponentTree`] owns its nodes in a flat vector addressed by
//! [`NodeIndex`]. Nodes are only ever appended under an existing parent, so
//! the structure is a tree by construction: there is no way to create a cycle.

use crate::kind::ComponentKind;
use crate::port::PortDescriptor;
use crate::property::ClassedProperty;
use cadence_document::Element;
use cadence_types::Identifier;
use serde::{Deserialize, Serialize};

/// Position of a node inside its [`ComponentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

/// One live component: an entity, director or attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub name: String,
    /// Declared (implementing) class.
    pub class_name: String,
    /// Structural class the framework sees.
    pub internal_class_name: String,
    pub kind: ComponentKind,
    pub is_class_definition: bool,
    /// Identity marker. `None` until stamped.
    pub identity: Option<Identifier>,
    pub class_id: Option<String>,
    pub semantic_types: Vec<ClassedProperty>,
    pub dependencies: Vec<ClassedProperty>,
    pub attributes: Vec<Element>,
    pub ports: Vec<PortDescriptor>,
    pub relations: Vec<Element>,
    pub links: Vec<Element>,
    pub documentation: Option<String>,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl ComponentNode {
    /// Creates a node whose internal class equals its declared class.
    pub fn new(name: impl Into<String>, class_name: impl Into<String>, kind: ComponentKind) -> Self {
        let class_name = class_name.into();
        Self {
            name: name.into(),
            internal_class_name: class_name.clone(),
            class_name,
            kind,
            is_class_definition: false,
            identity: None,
            class_id: None,
            semantic_types: Vec::new(),
            dependencies: Vec::new(),
            attributes: Vec::new(),
            ports: Vec::new(),
            relations: Vec::new(),
            links: Vec::new(),
            documentation: None,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: Identifier) -> Self {
        self.identity = Some(identity);
        self
    }

    #[must_use]
    pub fn with_internal_class(mut self, internal_class_name: impl Into<String>) -> Self {
        self.internal_class_name = internal_class_name.into();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: PortDescriptor) -> Self {
        self.set_port(port);
        self
    }

    #[must_use]
    pub fn class_definition(mut self) -> Self {
        self.is_class_definition = true;
        self
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&Element> {
        self.attributes.iter().find(|a| a.name() == Some(name))
    }

    /// Adds an attribute, replacing one with the same name in place.
    pub fn set_attribute(&mut self, attribute: Element) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name().is_some() && a.name() == attribute.name())
        {
            Some(slot) => *slot = attribute,
            None => self.attributes.push(attribute),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Element> {
        let position = self.attributes.iter().position(|a| a.name() == Some(name))?;
        Some(self.attributes.remove(position))
    }

    pub fn port(&self, name: &str) -> Option<&PortDescriptor> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Adds a port, replacing one with the same name in place.
    pub fn set_port(&mut self, port: PortDescriptor) {
        match self.ports.iter_mut().find(|p| p.name == port.name) {
            Some(slot) => *slot = port,
            None => self.ports.push(port),
        }
    }

    /// Copy of this node with no parent or children.
    fn detached(&self) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            ..self.clone()
        }
    }
}

/// Result of a bounded depth-first walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walk {
    /// Visited nodes in pre-order, with their depth below the start node.
    pub visited: Vec<(NodeIndex, usize)>,
    /// Nodes at the depth bound whose children were not visited.
    pub truncated: Vec<NodeIndex>,
}

/// An arena-allocated tree of live components.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTree {
    nodes: Vec<ComponentNode>,
}

impl ComponentTree {
    /// Creates a tree holding only `root`.
    pub fn new(root: ComponentNode) -> Self {
        Self {
            nodes: vec![root.detached()],
        }
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex::ROOT
    }

    pub fn root_node(&self) -> &ComponentNode {
        &self.nodes[0]
    }

    pub fn root_node_mut(&mut self) -> &mut ComponentNode {
        &mut self.nodes[0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&ComponentNode> {
        self.nodes.get(index.0)
    }

    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut ComponentNode> {
        self.nodes.get_mut(index.0)
    }

    /// Children of `index` in insertion order; empty for unknown nodes.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.node(index).map(ComponentNode::children).unwrap_or(&[])
    }

    /// Nodes in arena order (parents always precede their children).
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &ComponentNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// Appends `node` as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is not in this tree. Any parent or children
    /// carried by `node` are discarded.
    pub fn add_child(&mut self, parent: NodeIndex, node: ComponentNode) -> Option<NodeIndex> {
        self.node(parent)?;
        let index = NodeIndex(self.nodes.len());
        let mut node = node.detached();
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(index);
        Some(index)
    }

    pub fn find_child(&self, parent: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].name == name)
    }

    /// `base` if no child of `parent` uses it, otherwise `base2`, `base3`, ...
    pub fn unique_child_name(&self, parent: NodeIndex, base: &str) -> String {
        if self.find_child(parent, base).is_none() {
            return base.to_string();
        }
        (2u64..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| self.find_child(parent, candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    /// Deep-copies `other` under `parent`, returning the copy's root.
    pub fn graft(&mut self, parent: NodeIndex, other: &ComponentTree) -> Option<NodeIndex> {
        self.graft_from(parent, other, other.root())
    }

    /// Deep-copies the subtree of `source` rooted at `source_node` under `parent`.
    pub fn graft_from(
        &mut self,
        parent: NodeIndex,
        source: &ComponentTree,
        source_node: NodeIndex,
    ) -> Option<NodeIndex> {
        let top = self.add_child(parent, source.node(source_node)?.clone())?;
        let mut pending: Vec<(NodeIndex, NodeIndex)> = source
            .children(source_node)
            .iter()
            .rev()
            .map(|&child| (child, top))
            .collect();
        while let Some((from, into)) = pending.pop() {
            let copy = self.add_child(into, source.nodes[from.0].clone())?;
            pending.extend(source.children(from).iter().rev().map(|&child| (child, copy)));
        }
        Some(top)
    }

    /// Detached deep copy of the subtree rooted at `index`.
    pub fn subtree(&self, index: NodeIndex) -> Option<ComponentTree> {
        let mut tree = ComponentTree::new(self.node(index)?.clone());
        for &child in self.children(index) {
            tree.graft_from(NodeIndex::ROOT, self, child)?;
        }
        Some(tree)
    }

    /// Dotted full name, e.g. `.workflow.Constant`.
    pub fn path_of(&self, index: NodeIndex) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(index);
        while let Some(current) = cursor.and_then(|i| self.node(i)) {
            names.push(current.name.as_str());
            cursor = current.parent;
        }
        names.reverse();
        format!(".{}", names.join("."))
    }

    /// Depth-first pre-order walk from `start`, visiting nodes at most
    /// `max_depth` levels below it.
    pub fn walk(&self, start: NodeIndex, max_depth: usize) -> Walk {
        let mut walk = Walk::default();
        if self.node(start).is_none() {
            return walk;
        }
        let mut stack = vec![(start, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            walk.visited.push((index, depth));
            let children = self.children(index);
            if children.is_empty() {
                continue;
            }
            if depth >= max_depth {
                walk.truncated.push(index);
                continue;
            }
            stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
        }
        walk
    }
}
