//! Conversion between descriptor documents and live component trees.

use crate::error::{DescriptorError, DescriptorResult};
use crate::parser::{PropertyRole, parse_port};
use crate::serializer::{class_property, identity_property, port_element};
use cadence_document::{Element, MAX_NESTING, parse_document};
use cadence_model::vocabulary::{
    CLASS_ID, DEPENDENCY, SEMANTIC_TYPE, TAG_CLASS, TAG_DOC, TAG_ENTITY, TAG_LINK, TAG_PORT,
    TAG_PROPERTY, TAG_RELATION,
};
use cadence_model::{ClassedProperty, ComponentKind, ComponentNode, ComponentTree, NodeIndex};
use cadence_types::Identifier;

/// Reads a document and builds the live tree it describes.
pub fn tree_from_document(raw: &str) -> DescriptorResult<ComponentTree> {
    tree_from_element(&parse_document(raw)?)
}

/// Builds a live tree from an `<entity>` or `<class>` element.
///
/// Nested entities and class definitions become child nodes. Properties
/// whose class is a director become director children; every other
/// unreserved property is kept as an attribute of its node.
pub fn tree_from_element(element: &Element) -> DescriptorResult<ComponentTree> {
    if !matches!(element.tag(), TAG_ENTITY | TAG_CLASS) {
        return Err(DescriptorError::invalid(format!(
            "cannot instantiate <{}>",
            element.tag()
        )));
    }
    let mut tree = ComponentTree::new(entity_node(element));
    populate(&mut tree, NodeIndex::ROOT, element)?;
    Ok(tree)
}

fn entity_node(element: &Element) -> ComponentNode {
    let name = element.name().unwrap_or_default();
    let internal = element.class().unwrap_or_default();
    let mut node = ComponentNode::new(name, internal, ComponentKind::classify(internal));
    node.is_class_definition = element.tag() == TAG_CLASS;
    node
}

fn populate(tree: &mut ComponentTree, index: NodeIndex, element: &Element) -> DescriptorResult<()> {
    let native_ports = element.tag() == TAG_CLASS;
    for child in element.elements() {
        match child.tag() {
            TAG_PROPERTY => match PropertyRole::of(child) {
                PropertyRole::Identity => {
                    let text = child.value().unwrap_or_default();
                    node_at(tree, index)?.identity = Some(Identifier::parse(text)?);
                }
                PropertyRole::Class => {
                    let node = node_at(tree, index)?;
                    if let Some(class_name) = child.value() {
                        node.class_name = class_name.to_string();
                    }
                    node.class_id = child
                        .find_property(CLASS_ID)
                        .and_then(Element::value)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string);
                }
                PropertyRole::PortMarker => {
                    let port = parse_port(child, false)?;
                    node_at(tree, index)?.set_port(port);
                }
                PropertyRole::SemanticType => node_at(tree, index)?
                    .semantic_types
                    .push(ClassedProperty::from_element(child)),
                PropertyRole::Dependency => node_at(tree, index)?
                    .dependencies
                    .push(ClassedProperty::from_element(child)),
                PropertyRole::Generic => {
                    let class = child.class().unwrap_or_default();
                    if ComponentKind::classify(class) == ComponentKind::Director {
                        add_director(tree, index, child)?;
                    } else {
                        node_at(tree, index)?.set_attribute(child.clone());
                    }
                }
            },
            TAG_PORT => {
                let port = parse_port(child, native_ports)?;
                node_at(tree, index)?.set_port(port);
            }
            TAG_DOC => node_at(tree, index)?.documentation = Some(child.text()),
            TAG_RELATION => node_at(tree, index)?.relations.push(child.clone()),
            TAG_LINK => node_at(tree, index)?.links.push(child.clone()),
            TAG_ENTITY | TAG_CLASS => {
                let nested = tree
                    .add_child(index, entity_node(child))
                    .ok_or_else(|| DescriptorError::invalid("lost parent while instantiating"))?;
                populate(tree, nested, child)?;
            }
            _ => node_at(tree, index)?.set_attribute(child.clone()),
        }
    }
    Ok(())
}

pub(crate) fn add_director(tree: &mut ComponentTree, parent: NodeIndex, property: &Element) -> DescriptorResult<()> {
    let mut director = ComponentNode::new(
        property.name().unwrap_or_default(),
        property.class().unwrap_or_default(),
        ComponentKind::Director,
    );
    for setting in property.elements() {
        director.set_attribute(setting.clone());
    }
    tree.add_child(parent, director)
        .map(|_| ())
        .ok_or_else(|| DescriptorError::invalid("lost parent while instantiating"))
}

fn node_at(tree: &mut ComponentTree, index: NodeIndex) -> DescriptorResult<&mut ComponentNode> {
    tree.node_mut(index)
        .ok_or_else(|| DescriptorError::invalid(format!("node {} is not in the tree", index.index())))
}

/// Renders one node and its subtree as a document element.
///
/// Entities render as `<entity>` or `<class>`; directors and attributes
/// render as `<property>` elements carrying their own attributes. Subtrees
/// nested [`MAX_NESTING`] or more levels below `index` are rejected, the
/// same bound the document reader applies.
pub fn node_to_element(tree: &ComponentTree, index: NodeIndex) -> DescriptorResult<Element> {
    render(tree, index, 0)
}

fn render(tree: &ComponentTree, index: NodeIndex, depth: usize) -> DescriptorResult<Element> {
    if depth >= MAX_NESTING {
        return Err(DescriptorError::invalid(format!(
            "'{}' is nested deeper than {MAX_NESTING} levels",
            tree.path_of(index)
        )));
    }
    let node = tree
        .node(index)
        .ok_or_else(|| DescriptorError::invalid(format!("node {} is not in the tree", index.index())))?;

    if !node.kind.is_entity() {
        let mut property = Element::new(TAG_PROPERTY)
            .with_attr("name", &node.name)
            .with_attr("class", &node.class_name);
        for attribute in &node.attributes {
            property.push(attribute.clone());
        }
        for &child in node.children() {
            property.push(render(tree, child, depth + 1)?);
        }
        return Ok(property);
    }

    let tag = if node.is_class_definition {
        TAG_CLASS
    } else {
        TAG_ENTITY
    };
    let mut element = Element::new(tag)
        .with_attr("name", &node.name)
        .with_attr("class", &node.internal_class_name);

    if let Some(identity) = &node.identity {
        element.push(identity_property(&identity.to_string()));
    }
    element.push(class_property(
        &node.class_name,
        node.class_id.as_deref().unwrap_or_default(),
    ));
    for (i, dependency) in node.dependencies.iter().enumerate() {
        element.push(dependency.to_element_named(&format!("{DEPENDENCY}{i}")));
    }
    for (i, semantic_type) in node.semantic_types.iter().enumerate() {
        element.push(semantic_type.to_element_named(&format!("{SEMANTIC_TYPE}{i}")));
    }
    if let Some(doc) = &node.documentation {
        let mut doc_element = Element::new(TAG_DOC);
        if !doc.is_empty() {
            doc_element.push_text(doc.as_str());
        }
        element.push(doc_element);
    }
    for attribute in &node.attributes {
        element.push(attribute.clone());
    }

    let (attached, entities): (Vec<NodeIndex>, Vec<NodeIndex>) = node
        .children()
        .iter()
        .copied()
        .partition(|&child| tree.node(child).is_some_and(|c| !c.kind.is_entity()));
    for child in attached {
        element.push(render(tree, child, depth + 1)?);
    }

    for port in &node.ports {
        element.push(port_element(port, node.is_class_definition));
    }
    for relation in &node.relations {
        element.push(relation.clone());
    }
    for child in entities {
        element.push(render(tree, child, depth + 1)?);
    }
    for link in &node.links {
        element.push(link.clone());
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSITE: &str = r#"
        <entity name="workflow" class="ptolemy.actor.TypedCompositeActor">
          <property name="entityId" value="urn:lsid:localhost:wf:1:1"/>
          <property name="SDF Director" class="ptolemy.domains.sdf.kernel.SDFDirector">
            <property name="iterations" value="3"/>
          </property>
          <entity name="source" class="ptolemy.actor.lib.Const">
            <property name="entityId" value="urn:lsid:localhost:actor:2:1"/>
          </entity>
          <link port="source.output" relation="r1"/>
        </entity>"#;

    #[test]
    fn directors_become_children() {
        let tree = tree_from_document(COMPOSITE).unwrap();
        let director = tree.find_child(tree.root(), "SDF Director").unwrap();
        let node = tree.node(director).unwrap();
        assert_eq!(node.kind, ComponentKind::Director);
        assert_eq!(node.attribute("iterations").unwrap().value(), Some("3"));
    }

    #[test]
    fn nested_entities_keep_identity() {
        let tree = tree_from_document(COMPOSITE).unwrap();
        let source = tree.find_child(tree.root(), "source").unwrap();
        assert_eq!(
            tree.node(source).unwrap().identity,
            Some(Identifier::local("actor", 2, 1))
        );
        assert_eq!(tree.root_node().links.len(), 1);
    }

    #[test]
    fn rendering_reinstantiates_to_same_tree() {
        let tree = tree_from_document(COMPOSITE).unwrap();
        let element = node_to_element(&tree, tree.root()).unwrap();
        assert_eq!(tree_from_element(&element).unwrap(), tree);
    }

    fn composite_chain(levels: usize) -> ComponentTree {
        let mut tree = ComponentTree::new(ComponentNode::new(
            "level0",
            "ptolemy.actor.TypedCompositeActor",
            ComponentKind::Composite,
        ));
        let mut parent = tree.root();
        for level in 1..=levels {
            parent = tree
                .add_child(
                    parent,
                    ComponentNode::new(
                        format!("level{level}"),
                        "ptolemy.actor.TypedCompositeActor",
                        ComponentKind::Composite,
                    ),
                )
                .unwrap();
        }
        tree
    }

    #[test]
    fn rendering_stops_at_nesting_bound() {
        let tree = composite_chain(MAX_NESTING + 50);
        let err = node_to_element(&tree, tree.root()).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidDescriptor(_)));
        assert!(err.to_string().contains("nested deeper than"));
    }

    #[test]
    fn rendering_within_nesting_bound_succeeds() {
        let tree = composite_chain(MAX_NESTING - 1);
        assert!(node_to_element(&tree, tree.root()).is_ok());
    }

    #[test]
    fn rejects_non_component_root() {
        let err = tree_from_document("<relation name=\"r\"/>").unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidDescriptor(_)));
    }
}
