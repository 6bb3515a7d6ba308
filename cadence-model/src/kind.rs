use serde::{Deserialize, Serialize};

/// Structural classes known to be composite containers.
const COMPOSITE_CLASSES: &[&str] = &[
    "ptolemy.kernel.CompositeEntity",
    "ptolemy.actor.CompositeActor",
    "ptolemy.actor.TypedCompositeActor",
    "ptolemy.actor.lib.hoc.MultiCompositeActor",
    "ptolemy.actor.lib.hoc.ModalModel",
    "org.kepler.moml.CompositeClassEntity",
];

/// The structural shape of a component, computed once from its internal
/// class name and carried alongside it.
///
/// Drives serialization shape and the class-resolution strategies that are
/// worth trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// A bare attribute (parameter, annotation) attached to a container.
    Attribute,
    /// A director: attached to a container, not an entity.
    Director,
    /// A container of nested entities.
    Composite,
    /// A leaf entity.
    Atomic,
}

impl ComponentKind {
    /// Classifies an internal (structural) class name.
    pub fn classify(internal_class_name: &str) -> Self {
        let simple = internal_class_name
            .rsplit('.')
            .next()
            .unwrap_or(internal_class_name);
        if is_composite_family(internal_class_name) {
            Self::Composite
        } else if simple.ends_with("Director") {
            Self::Director
        } else if simple.ends_with("Attribute") || simple.ends_with("Parameter") {
            Self::Attribute
        } else {
            Self::Atomic
        }
    }

    /// Entities are the kinds that can hold an identity and ports.
    pub fn is_entity(self) -> bool {
        matches!(self, Self::Composite | Self::Atomic)
    }

    pub fn is_container(self) -> bool {
        self == Self::Composite
    }
}

/// Whether `class_name` is a known member of the composite-container family.
pub fn is_composite_family(class_name: &str) -> bool {
    COMPOSITE_CLASSES.contains(&class_name)
        || class_name.ends_with("CompositeActor")
        || class_name.ends_with("CompositeEntity")
}
