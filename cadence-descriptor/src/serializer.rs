//! Descriptor serializer.
//!
//! Section order is fixed: identity, class, dependencies, semantic types,
//! documentation and attributes, ports, relations, class definitions,
//! entities, links. Readers of the emitted text depend on ports following
//! the attributes.

use cadence_document::{Element, write_document};
use cadence_model::vocabulary::{
    CLASS, CLASS_ID, DEFAULT_PORT_CLASS, DEPENDENCY, ENTITY_ID, NAMED_OBJ_ID_CLASS,
    PORT_ATTRIBUTE_CLASS, PORT_CLASS, PORT_DATA_TYPE, PORT_DIRECTION, PORT_MULTIPORT,
    SEMANTIC_TYPE, STRING_ATTRIBUTE_CLASS, TAG_CLASS, TAG_DOC, TAG_ENTITY, TAG_PORT, TAG_PROPERTY,
};
use cadence_model::{ComponentDescriptor, PortDescriptor};

/// Controls which optional sections are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Rename semantic-type properties to `semanticType0`, `semanticType1`, ...
    pub suffix_semantic_type_names: bool,
    pub include_attributes: bool,
    pub include_ports: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            suffix_semantic_type_names: true,
            include_attributes: true,
            include_ports: true,
        }
    }
}

/// Serializes a descriptor to indented text with a leading declaration.
pub fn serialize(descriptor: &ComponentDescriptor, options: &SerializeOptions) -> String {
    write_document(&to_element(descriptor, options))
}

/// Builds the document tree [`serialize`] writes.
pub fn to_element(descriptor: &ComponentDescriptor, options: &SerializeOptions) -> Element {
    let tag = if descriptor.is_class_definition() {
        TAG_CLASS
    } else {
        TAG_ENTITY
    };
    let mut root = Element::new(tag)
        .with_attr("name", descriptor.name())
        .with_attr("class", descriptor.internal_class_name());

    root.push(identity_property(&descriptor.actor_id().to_string()));
    root.push(class_property(descriptor.class_name(), descriptor.class_id()));

    for (i, dependency) in descriptor.dependencies().iter().enumerate() {
        root.push(dependency.to_element_named(&format!("{DEPENDENCY}{i}")));
    }

    for (i, semantic_type) in descriptor.semantic_types().iter().enumerate() {
        let name = if options.suffix_semantic_type_names {
            format!("{SEMANTIC_TYPE}{i}")
        } else {
            semantic_type.name.clone()
        };
        root.push(semantic_type.to_element_named(&name));
    }

    if let Some(doc) = descriptor.documentation() {
        let mut element = Element::new(TAG_DOC);
        if !doc.is_empty() {
            element.push_text(doc);
        }
        root.push(element);
    }
    if options.include_attributes {
        for attribute in descriptor.attributes() {
            root.push(attribute.clone());
        }
    }

    if options.include_ports {
        for port in descriptor.ports() {
            root.push(port_element(port, descriptor.is_class_definition()));
        }
    }

    for relation in descriptor.relations() {
        root.push(relation.clone());
    }
    for class_definition in descriptor.class_definitions() {
        root.push(class_definition.clone());
    }
    for entity in descriptor.entities() {
        root.push(entity.clone());
    }
    if let Some(links) = descriptor.nested_links() {
        root.push_raw(links);
    }

    root
}

pub(crate) fn identity_property(identifier: &str) -> Element {
    Element::property(ENTITY_ID, identifier, NAMED_OBJ_ID_CLASS)
}

/// `<property name="class" value=".."><property name="id" value=".."/></property>`.
///
/// Both values are written even when empty so the reader finds them.
pub(crate) fn class_property(class_name: &str, class_id: &str) -> Element {
    Element::new(TAG_PROPERTY)
        .with_attr("name", CLASS)
        .with_attr("value", class_name)
        .with_attr("class", STRING_ATTRIBUTE_CLASS)
        .with_child(
            Element::new(TAG_PROPERTY)
                .with_attr("name", CLASS_ID)
                .with_attr("value", class_id)
                .with_attr("class", NAMED_OBJ_ID_CLASS),
        )
}

/// Native `<port>` for class definitions, property-wrapped marker otherwise.
pub(crate) fn port_element(port: &PortDescriptor, native: bool) -> Element {
    let mut element = if native {
        Element::new(TAG_PORT)
            .with_attr("name", &port.name)
            .with_attr("class", &port.port_class_name)
    } else {
        Element::new(TAG_PROPERTY)
            .with_attr("name", &port.name)
            .with_attr("class", PORT_ATTRIBUTE_CLASS)
    };
    element.push(port_setting(PORT_DIRECTION, port.direction.as_str()));
    element.push(port_setting(PORT_DATA_TYPE, &port.data_type));
    element.push(port_setting(
        PORT_MULTIPORT,
        if port.is_multiport { "true" } else { "false" },
    ));
    if !native && port.port_class_name != DEFAULT_PORT_CLASS {
        element.push(port_setting(PORT_CLASS, &port.port_class_name));
    }
    for extra in &port.extra_attributes {
        element.push(extra.clone());
    }
    element
}

fn port_setting(name: &str, value: &str) -> Element {
    Element::new(TAG_PROPERTY)
        .with_attr("name", name)
        .with_attr("value", value)
        .with_attr("class", STRING_ATTRIBUTE_CLASS)
}
