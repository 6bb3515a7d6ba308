use cadence_document::Element;
use serde::{Deserialize, Serialize};

/// A named value tagged with the class that interprets it.
///
/// Dependencies and semantic-type annotations both take this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassedProperty {
    pub name: String,
    pub value: String,
    pub class_name: String,
}

impl ClassedProperty {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            class_name: class_name.into(),
        }
    }

    /// Reads `name`, `value` and `class` from a `<property>` element.
    /// Missing attributes become empty strings.
    pub fn from_element(element: &Element) -> Self {
        Self::new(
            element.name().unwrap_or_default(),
            element.value().unwrap_or_default(),
            element.class().unwrap_or_default(),
        )
    }

    /// Renders as a `<property>` element under `name`.
    pub fn to_element_named(&self, name: &str) -> Element {
        Element::property(name, &self.value, &self.class_name)
    }
}
