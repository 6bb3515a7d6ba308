//! Descriptor parser (construction from raw text).

use crate::error::{DescriptorError, DescriptorResult};
use cadence_document::{Element, parse_document, write_fragment};
use cadence_model::vocabulary::{
    CLASS, CLASS_ID, DEFAULT_PORT_CLASS, DEPENDENCY, ENTITY_ID, PORT_ATTRIBUTE_CLASS, PORT_CLASS,
    PORT_DATA_TYPE, PORT_DIRECTION, PORT_MULTIPORT, SEMANTIC_TYPE, SEMANTIC_TYPE_CLASS, TAG_CLASS,
    TAG_DOC, TAG_ENTITY, TAG_LINK, TAG_PORT, TAG_PROPERTY, TAG_RELATION,
};
use cadence_model::{ClassedProperty, ComponentDescriptor, PortDescriptor, PortDirection};
use cadence_types::Identifier;

/// What a `<property>` child of a component means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropertyRole {
    Identity,
    Class,
    PortMarker,
    SemanticType,
    Dependency,
    Generic,
}

impl PropertyRole {
    pub(crate) fn of(property: &Element) -> Self {
        let name = property.name().unwrap_or_default();
        let class = property.class().unwrap_or_default();
        if name == ENTITY_ID {
            Self::Identity
        } else if name == CLASS {
            Self::Class
        } else if class == PORT_ATTRIBUTE_CLASS {
            Self::PortMarker
        } else if name.starts_with(SEMANTIC_TYPE) || class == SEMANTIC_TYPE_CLASS {
            Self::SemanticType
        } else if name.starts_with(DEPENDENCY) || class.ends_with("Dependency") {
            Self::Dependency
        } else {
            Self::Generic
        }
    }
}

/// Parses a descriptor document.
///
/// Any failure, from malformed markup to a port missing its direction, is
/// reported as [`DescriptorError::InvalidDescriptor`].
pub fn parse_descriptor(raw: &str) -> DescriptorResult<ComponentDescriptor> {
    let root = parse_document(raw)
        .map_err(|e| DescriptorError::invalid(format!("malformed document: {e}")))?;
    descriptor_from_element(&root)
}

/// Builds a descriptor from an already-read document tree.
pub fn descriptor_from_element(root: &Element) -> DescriptorResult<ComponentDescriptor> {
    let is_class_definition = match root.tag() {
        TAG_ENTITY => false,
        TAG_CLASS => true,
        other => {
            return Err(DescriptorError::invalid(format!(
                "root element must be <{TAG_ENTITY}> or <{TAG_CLASS}>, found <{other}>"
            )));
        }
    };
    let name = root
        .name()
        .ok_or_else(|| DescriptorError::invalid("root element has no name"))?;
    let internal_class_name = root
        .class()
        .ok_or_else(|| DescriptorError::invalid(format!("'{name}' has no structural class")))?;

    let actor_id = read_identity(root)?;

    let class_property = root
        .find_property(CLASS)
        .ok_or_else(|| DescriptorError::invalid(format!("'{name}' has no class property")))?;
    let class_name = class_property.value().ok_or_else(|| {
        DescriptorError::invalid(format!("class property of '{name}' has no value"))
    })?;
    let class_id = class_property
        .find_property(CLASS_ID)
        .ok_or_else(|| {
            DescriptorError::invalid(format!("class property of '{name}' has no nested id"))
        })?
        .value()
        .unwrap_or_default();

    let mut descriptor =
        ComponentDescriptor::new(name, class_name, internal_class_name, actor_id);
    descriptor.set_class_id(class_id);
    descriptor.set_class_definition(is_class_definition);

    let mut links = Vec::new();
    for child in root.elements() {
        match child.tag() {
            TAG_PROPERTY => match PropertyRole::of(child) {
                PropertyRole::Identity | PropertyRole::Class => {}
                PropertyRole::PortMarker => descriptor.add_port(parse_port(child, false)?),
                PropertyRole::SemanticType => {
                    descriptor.add_semantic_type(ClassedProperty::from_element(child));
                }
                PropertyRole::Dependency => {
                    descriptor.add_dependency(ClassedProperty::from_element(child));
                }
                PropertyRole::Generic => descriptor.add_attribute(child.clone()),
            },
            TAG_PORT => descriptor.add_port(parse_port(child, true)?),
            TAG_DOC => descriptor.set_documentation(Some(child.text())),
            TAG_RELATION => descriptor.add_relation(child.clone()),
            TAG_CLASS => descriptor.add_class_definition(child.clone()),
            TAG_ENTITY => descriptor.add_entity(child.clone()),
            TAG_LINK => links.push(write_fragment(child)),
            _ => descriptor.add_attribute(child.clone()),
        }
    }
    if !links.is_empty() {
        descriptor.set_nested_links(Some(links.join("\n")))?;
    }

    Ok(descriptor)
}

fn read_identity(root: &Element) -> DescriptorResult<Identifier> {
    let property = root
        .find_property(ENTITY_ID)
        .ok_or_else(|| DescriptorError::invalid("missing entityId property"))?;
    let text = property
        .value()
        .ok_or_else(|| DescriptorError::invalid("entityId property has no value"))?;
    Identifier::parse(text).map_err(|e| DescriptorError::invalid(format!("entityId: {e}")))
}

/// Parses either port shape.
///
/// A native `<port>` carries its class in the `class` attribute; the
/// property-wrapped marker carries a non-default class in a `portClass`
/// sub-property.
pub(crate) fn parse_port(element: &Element, native: bool) -> DescriptorResult<PortDescriptor> {
    let name = element
        .name()
        .ok_or_else(|| DescriptorError::invalid("port has no name"))?;

    let direction = required_sub_property(element, name, PORT_DIRECTION)?
        .parse::<PortDirection>()
        .map_err(|e| DescriptorError::invalid(format!("port '{name}': {e}")))?;
    let data_type = required_sub_property(element, name, PORT_DATA_TYPE)?;
    let multiport_text = required_sub_property(element, name, PORT_MULTIPORT)?;
    let is_multiport = parse_flag(multiport_text).ok_or_else(|| {
        DescriptorError::invalid(format!(
            "port '{name}': isMultiport must be true or false, found '{multiport_text}'"
        ))
    })?;

    let mut port = PortDescriptor::new(name, direction, data_type);
    port.is_multiport = is_multiport;
    if native {
        port.port_class_name = element.class().unwrap_or(DEFAULT_PORT_CLASS).to_string();
    }

    for sub in element.elements() {
        let reserved = sub.tag() == TAG_PROPERTY
            && matches!(
                sub.name(),
                Some(PORT_DIRECTION | PORT_DATA_TYPE | PORT_MULTIPORT)
            );
        if reserved {
            continue;
        }
        if sub.tag() == TAG_PROPERTY && sub.name() == Some(PORT_CLASS) {
            // A native port's class attribute wins over the sub-property.
            if !native || element.class().is_none() {
                port.port_class_name = sub.value().unwrap_or(DEFAULT_PORT_CLASS).to_string();
            }
            continue;
        }
        port.extra_attributes.push(sub.clone());
    }

    Ok(port)
}

fn required_sub_property<'a>(
    port: &'a Element,
    port_name: &str,
    key: &str,
) -> DescriptorResult<&'a str> {
    port.find_property(key)
        .map(|p| p.value().unwrap_or_default())
        .ok_or_else(|| DescriptorError::invalid(format!("port '{port_name}' has no {key}")))
}

fn parse_flag(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_roles() {
        let role = |name: &str, class: &str| PropertyRole::of(&Element::property(name, "v", class));
        assert_eq!(role("entityId", ""), PropertyRole::Identity);
        assert_eq!(role("class", ""), PropertyRole::Class);
        assert_eq!(role("out", PORT_ATTRIBUTE_CLASS), PropertyRole::PortMarker);
        assert_eq!(role("semanticType7", ""), PropertyRole::SemanticType);
        assert_eq!(role("anything", SEMANTIC_TYPE_CLASS), PropertyRole::SemanticType);
        assert_eq!(role("dependency0", ""), PropertyRole::Dependency);
        assert_eq!(role("jar", "org.kepler.moml.Dependency"), PropertyRole::Dependency);
        assert_eq!(role("rate", "ptolemy.data.expr.Parameter"), PropertyRole::Generic);
    }

    fn native_port(markup: &str) -> PortDescriptor {
        parse_port(&cadence_document::parse_document(markup).unwrap(), true).unwrap()
    }

    #[test]
    fn native_port_class_attribute_wins_over_sub_property() {
        let port = native_port(
            r#"<port name="in" class="ptolemy.actor.TypedIOPort">
                 <property name="direction" value="input"/>
                 <property name="dataType" value="int"/>
                 <property name="isMultiport" value="false"/>
                 <property name="portClass" value="org.example.OtherPort"/>
               </port>"#,
        );
        assert_eq!(port.port_class_name, "ptolemy.actor.TypedIOPort");
        assert!(port.extra_attributes.is_empty());
    }

    #[test]
    fn native_port_without_class_attribute_reads_sub_property() {
        let port = native_port(
            r#"<port name="in">
                 <property name="direction" value="input"/>
                 <property name="dataType" value="int"/>
                 <property name="isMultiport" value="false"/>
                 <property name="portClass" value="org.example.OtherPort"/>
               </port>"#,
        );
        assert_eq!(port.port_class_name, "org.example.OtherPort");
        assert!(port.extra_attributes.is_empty());
    }

    #[test]
    fn flags_are_strict() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" false "), Some(false));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }
}
