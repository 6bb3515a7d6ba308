use crate::error::{DescriptorError, DescriptorResult};
use crate::instantiate::node_to_element;
use cadence_document::write_fragment;
use cadence_model::{ComponentDescriptor, ComponentTree, LiveComponent, NodeIndex};

/// Builds a descriptor from a live node.
///
/// The node must carry an identity marker. Nested class definitions and
/// entities are captured as opaque elements, directors and attribute nodes
/// as attributes. The node's subtree is attached as the prototype.
pub fn introspect(tree: &ComponentTree, index: NodeIndex) -> DescriptorResult<ComponentDescriptor> {
    let node = tree.node(index).ok_or_else(|| {
        DescriptorError::invalid(format!("node {} is not in the tree", index.index()))
    })?;
    let identity = node.identity.clone().ok_or_else(|| {
        DescriptorError::invalid(format!(
            "'{}' has no identity marker",
            tree.path_of(index)
        ))
    })?;

    let mut descriptor = ComponentDescriptor::new(
        node.name.as_str(),
        node.class_name.as_str(),
        node.internal_class_name.as_str(),
        identity,
    );
    descriptor.set_class_id(node.class_id.as_deref().unwrap_or(node.class_name.as_str()));
    descriptor.set_class_definition(node.is_class_definition);
    descriptor.set_documentation(node.documentation.clone());

    for semantic_type in &node.semantic_types {
        descriptor.add_semantic_type(semantic_type.clone());
    }
    for dependency in &node.dependencies {
        descriptor.add_dependency(dependency.clone());
    }
    for attribute in &node.attributes {
        descriptor.add_attribute(attribute.clone());
    }
    for port in &node.ports {
        descriptor.add_port(port.clone());
    }
    for relation in &node.relations {
        descriptor.add_relation(relation.clone());
    }

    for &child in node.children() {
        let Some(child_node) = tree.node(child) else {
            continue;
        };
        let element = node_to_element(tree, child)?;
        if !child_node.kind.is_entity() {
            descriptor.add_attribute(element);
        } else if child_node.is_class_definition {
            descriptor.add_class_definition(element);
        } else {
            descriptor.add_entity(element);
        }
    }

    if !node.links.is_empty() {
        let links: Vec<String> = node.links.iter().map(write_fragment).collect();
        descriptor.set_nested_links(Some(links.join("\n")))?;
    }

    descriptor.set_prototype(tree.subtree(index).map(LiveComponent::new));
    Ok(descriptor)
}
