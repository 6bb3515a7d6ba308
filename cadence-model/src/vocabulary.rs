//! Reserved property names and class names of the descriptor dialect.

/// Top-level identity property holding the component's [`Identifier`](cadence_types::Identifier).
pub const ENTITY_ID: &str = "entityId";
/// Property holding the declared class name.
pub const CLASS: &str = "class";
/// Property nested inside [`CLASS`] holding the class identity.
pub const CLASS_ID: &str = "id";
/// Name prefix of semantic-type properties.
pub const SEMANTIC_TYPE: &str = "semanticType";
/// Name prefix of dependency properties.
pub const DEPENDENCY: &str = "dependency";

/// Port sub-properties.
pub const PORT_DIRECTION: &str = "direction";
pub const PORT_DATA_TYPE: &str = "dataType";
pub const PORT_MULTIPORT: &str = "isMultiport";
/// Carries a non-default port class through the property-wrapped port shape.
pub const PORT_CLASS: &str = "portClass";

pub const NAMED_OBJ_ID_CLASS: &str = "org.kepler.moml.NamedObjId";
pub const STRING_ATTRIBUTE_CLASS: &str = "ptolemy.kernel.util.StringAttribute";
pub const SEMANTIC_TYPE_CLASS: &str = "org.kepler.sms.SemanticType";
pub const DEPENDENCY_CLASS: &str = "org.kepler.moml.Dependency";
pub const PORT_ATTRIBUTE_CLASS: &str = "org.kepler.moml.PortAttribute";
pub const DEFAULT_PORT_CLASS: &str = "ptolemy.actor.TypedIOPort";
pub const DEFAULT_ENTITY_CLASS: &str = "ptolemy.kernel.ComponentEntity";
pub const DEFAULT_COMPOSITE_CLASS: &str = "ptolemy.actor.TypedCompositeActor";

/// Element tags.
pub const TAG_ENTITY: &str = "entity";
pub const TAG_CLASS: &str = "class";
pub const TAG_PROPERTY: &str = "property";
pub const TAG_PORT: &str = "port";
pub const TAG_RELATION: &str = "relation";
pub const TAG_LINK: &str = "link";
pub const TAG_DOC: &str = "doc";
