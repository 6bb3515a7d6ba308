use crate::error::{DescriptorError, DescriptorResult};
use crate::instantiate::{add_director, tree_from_element};
use crate::resolver::TypeResolver;
use crate::strategy::resolve_class;
use cadence_document::{Element, parse_fragment};
use cadence_model::{
    ComponentDescriptor, ComponentKind, ComponentNode, ComponentTree, LiveComponent, NodeIndex,
};
use tracing::debug;

/// Where a materialized component ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// No container was given; the caller owns the new component.
    Detached(LiveComponent),
    /// Grafted into the container at this index.
    Attached(NodeIndex),
}

impl Materialized {
    pub fn into_detached(self) -> Option<LiveComponent> {
        match self {
            Self::Detached(component) => Some(component),
            Self::Attached(_) => None,
        }
    }

    pub fn attached_index(&self) -> Option<NodeIndex> {
        match self {
            Self::Attached(index) => Some(*index),
            Self::Detached(_) => None,
        }
    }
}

/// Builds a live component from a descriptor.
///
/// Resolves the class, stamps the descriptor's identity, class names,
/// semantic types, dependencies, attributes and ports onto the new root, and
/// either grafts it under `container` (renamed if the name is taken) or
/// returns it detached.
///
/// A composite also receives the directors, nested components, relations
/// and links its descriptor carries, unless the resolved class already
/// supplied them.
pub fn materialize(
    descriptor: &ComponentDescriptor,
    resolver: &dyn TypeResolver,
    container: Option<(&mut ComponentTree, NodeIndex)>,
) -> DescriptorResult<Materialized> {
    let container_path = match &container {
        Some((target, parent)) => {
            if target.node(*parent).is_none() {
                return Err(DescriptorError::invalid(format!(
                    "container node {} does not exist",
                    parent.index()
                )));
            }
            Some(target.path_of(*parent))
        }
        None => None,
    };

    let mut tree = resolve_class(descriptor, resolver, container_path.as_deref())?;
    stamp(tree.root_node_mut(), descriptor);
    if tree.root_node().kind == ComponentKind::Composite {
        fill_composite(&mut tree, descriptor)?;
    }

    let Some((target, parent)) = container else {
        debug!(id = %descriptor.actor_id(), name = descriptor.name(), "materialized detached component");
        return Ok(Materialized::Detached(LiveComponent::new(tree)));
    };

    let name = target.unique_child_name(parent, descriptor.name());
    tree.root_node_mut().name = name;
    let index = target
        .graft(parent, &tree)
        .ok_or_else(|| DescriptorError::invalid("container vanished while grafting"))?;
    debug!(
        id = %descriptor.actor_id(),
        path = %target.path_of(index),
        "materialized component into container"
    );
    Ok(Materialized::Attached(index))
}

fn stamp(node: &mut ComponentNode, descriptor: &ComponentDescriptor) {
    node.name = descriptor.name().to_string();
    node.identity = Some(descriptor.actor_id().clone());
    node.class_name = descriptor.class_name().to_string();
    node.internal_class_name = descriptor.internal_class_name().to_string();
    if node.kind.is_entity() {
        node.kind = descriptor.kind();
    }
    node.is_class_definition = descriptor.is_class_definition();
    if !descriptor.class_id().is_empty() {
        node.class_id = Some(descriptor.class_id().to_string());
    }
    node.semantic_types = descriptor.semantic_types().to_vec();
    node.dependencies = descriptor.dependencies().to_vec();
    for attribute in descriptor.attributes() {
        node.set_attribute(attribute.clone());
    }
    for port in descriptor.ports() {
        node.set_port(port.clone());
    }
    if let Some(doc) = descriptor.documentation() {
        node.documentation = Some(doc.to_string());
    }
}

fn fill_composite(tree: &mut ComponentTree, descriptor: &ComponentDescriptor) -> DescriptorResult<()> {
    let root = tree.root();

    let directors: Vec<Element> = tree
        .root_node()
        .attributes
        .iter()
        .filter(|a| {
            ComponentKind::classify(a.class().unwrap_or_default()) == ComponentKind::Director
        })
        .cloned()
        .collect();
    for director in &directors {
        let name = director.name().unwrap_or_default();
        tree.root_node_mut().remove_attribute(name);
        if tree.find_child(root, name).is_none() {
            add_director(tree, root, director)?;
        }
    }

    for nested in descriptor
        .class_definitions()
        .iter()
        .chain(descriptor.entities())
    {
        if tree
            .find_child(root, nested.name().unwrap_or_default())
            .is_some()
        {
            continue;
        }
        let subtree = tree_from_element(nested)?;
        tree.graft(root, &subtree)
            .ok_or_else(|| DescriptorError::invalid("lost root while grafting nested components"))?;
    }

    let node = tree.root_node_mut();
    if node.relations.is_empty() {
        node.relations = descriptor.relations().to_vec();
    }
    if node.links.is_empty()
        && let Some(links) = descriptor.nested_links()
    {
        node.links = parse_fragment(links)?;
    }
    Ok(())
}
