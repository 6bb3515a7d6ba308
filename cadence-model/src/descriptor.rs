use crate::kind::ComponentKind;
use crate::live::LiveComponent;
use crate::port::PortDescriptor;
use crate::property::ClassedProperty;
use cadence_document::{DocumentResult, Element, parse_fragment};
use cadence_types::Identifier;
use serde::{Deserialize, Serialize};

/// Serializable metadata for one component.
///
/// Built either by parsing a descriptor document or by introspecting a live
/// component. `kind` is derived from the internal class name when the
/// descriptor is created and does not change afterwards.
///
/// Attribute, relation, class-definition and entity nodes are opaque: they
/// are preserved in order and re-emitted, never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    name: String,
    class_id: String,
    class_name: String,
    internal_class_name: String,
    actor_id: Identifier,
    is_class_definition: bool,
    kind: ComponentKind,
    dependencies: Vec<ClassedProperty>,
    semantic_types: Vec<ClassedProperty>,
    ports: Vec<PortDescriptor>,
    attributes: Vec<Element>,
    relations: Vec<Element>,
    class_definitions: Vec<Element>,
    entities: Vec<Element>,
    nested_links: Option<String>,
    documentation: Option<String>,
    /// Live component this descriptor was introspected from, if any.
    #[serde(skip)]
    prototype: Option<LiveComponent>,
}

impl ComponentDescriptor {
    pub fn new(
        name: impl Into<String>,
        class_name: impl Into<String>,
        internal_class_name: impl Into<String>,
        actor_id: Identifier,
    ) -> Self {
        let internal_class_name = internal_class_name.into();
        Self {
            name: name.into(),
            class_id: String::new(),
            class_name: class_name.into(),
            kind: ComponentKind::classify(&internal_class_name),
            internal_class_name,
            actor_id,
            is_class_definition: false,
            dependencies: Vec::new(),
            semantic_types: Vec::new(),
            ports: Vec::new(),
            attributes: Vec::new(),
            relations: Vec::new(),
            class_definitions: Vec::new(),
            entities: Vec::new(),
            nested_links: None,
            documentation: None,
            prototype: None,
        }
    }

    // ================================================================
    // Accessors
    // ================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn internal_class_name(&self) -> &str {
        &self.internal_class_name
    }

    pub fn actor_id(&self) -> &Identifier {
        &self.actor_id
    }

    pub fn is_class_definition(&self) -> bool {
        self.is_class_definition
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn dependencies(&self) -> &[ClassedProperty] {
        &self.dependencies
    }

    pub fn semantic_types(&self) -> &[ClassedProperty] {
        &self.semantic_types
    }

    pub fn ports(&self) -> &[PortDescriptor] {
        &self.ports
    }

    pub fn port(&self, name: &str) -> Option<&PortDescriptor> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub fn attributes(&self) -> &[Element] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Element> {
        self.attributes.iter().find(|a| a.name() == Some(name))
    }

    pub fn relations(&self) -> &[Element] {
        &self.relations
    }

    pub fn class_definitions(&self) -> &[Element] {
        &self.class_definitions
    }

    pub fn entities(&self) -> &[Element] {
        &self.entities
    }

    pub fn nested_links(&self) -> Option<&str> {
        self.nested_links.as_deref()
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub fn prototype(&self) -> Option<&LiveComponent> {
        self.prototype.as_ref()
    }

    /// Whether the descriptor describes a container of nested components.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    // ================================================================
    // Mutation
    // ================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_actor_id(&mut self, actor_id: Identifier) {
        self.actor_id = actor_id;
    }

    pub fn set_class_id(&mut self, class_id: impl Into<String>) {
        self.class_id = class_id.into();
    }

    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = class_name.into();
    }

    pub fn set_class_definition(&mut self, is_class_definition: bool) {
        self.is_class_definition = is_class_definition;
    }

    pub fn set_documentation(&mut self, documentation: Option<String>) {
        self.documentation = documentation;
    }

    /// Sets the raw wiring markup. Blank text clears it.
    ///
    /// The markup is emitted verbatim when the descriptor is serialized, so
    /// it must read as a sequence of well-formed elements; anything else is
    /// rejected and the previous links are kept.
    pub fn set_nested_links(&mut self, nested_links: Option<String>) -> DocumentResult<()> {
        let nested_links = nested_links.filter(|links| !links.trim().is_empty());
        if let Some(links) = &nested_links {
            parse_fragment(links)?;
        }
        self.nested_links = nested_links;
        Ok(())
    }

    pub fn set_prototype(&mut self, prototype: Option<LiveComponent>) {
        self.prototype = prototype;
    }

    /// Adds a generic attribute. An attribute with the same name is replaced
    /// in place, so the emitted document never carries duplicate names.
    pub fn add_attribute(&mut self, attribute: Element) {
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

    pub fn add_dependency(&mut self, dependency: ClassedProperty) {
        self.dependencies.push(dependency);
    }

    pub fn add_semantic_type(&mut self, semantic_type: ClassedProperty) {
        self.semantic_types.push(semantic_type);
    }

    /// Adds a port. A port with the same name is replaced in place.
    pub fn add_port(&mut self, port: PortDescriptor) {
        match self.ports.iter_mut().find(|p| p.name == port.name) {
            Some(slot) => *slot = port,
            None => self.ports.push(port),
        }
    }

    pub fn add_relation(&mut self, relation: Element) {
        self.relations.push(relation);
    }

    pub fn add_class_definition(&mut self, class_definition: Element) {
        self.class_definitions.push(class_definition);
    }

    pub fn add_entity(&mut self, entity: Element) {
        self.entities.push(entity);
    }
}

/// Equality over the metadata only; the attached prototype is ignored.
impl PartialEq for ComponentDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.class_id == other.class_id
            && self.class_name == other.class_name
            && self.internal_class_name == other.internal_class_name
            && self.actor_id == other.actor_id
            && self.is_class_definition == other.is_class_definition
            && self.kind == other.kind
            && self.dependencies == other.dependencies
            && self.semantic_types == other.semantic_types
            && self.ports == other.ports
            && self.attributes == other.attributes
            && self.relations == other.relations
            && self.class_definitions == other.class_definitions
            && self.entities == other.entities
            && self.nested_links == other.nested_links
            && self.documentation == other.documentation
    }
}
