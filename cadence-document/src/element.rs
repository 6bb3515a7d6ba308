use serde::{Deserialize, Serialize};

/// A node in a descriptor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    /// Character data, already unescaped and trimmed.
    Text(String),
    /// Pre-rendered markup written verbatim by the writer.
    ///
    /// The reader never produces this variant; it exists so opaque fragments
    /// (wiring links) can be carried through serialization untouched.
    Raw(String),
}

/// An element with ordered attributes and ordered children.
///
/// Attribute order is preserved so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Shorthand for `<property name=".." value=".." class=".."/>`.
    ///
    /// Empty `value` or `class` are omitted.
    #[must_use]
    pub fn property(name: &str, value: &str, class: &str) -> Self {
        let mut element = Self::new("property").with_attr("name", name);
        if !value.is_empty() {
            element.set_attr("value", value);
        }
        if !class.is_empty() {
            element.set_attr("class", class);
        }
        element
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn value(&self) -> Option<&str> {
        self.attr("value")
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn push_raw(&mut self, markup: impl Into<String>) {
        self.children.push(Node::Raw(markup.into()));
    }

    /// Iterates over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child `<property>` with the given `name`.
    pub fn find_property(&self, name: &str) -> Option<&Element> {
        self.elements()
            .find(|e| e.tag == "property" && e.name() == Some(name))
    }

    /// Concatenated text content of the direct children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
