//! Type-resolution collaborator.
//!
//! Class resolution never loads code itself. It asks a [`TypeResolver`] for
//! a [`ComponentFactory`] by class name, or for a document that defines the
//! class. [`TypeCatalog`] is the bundled table-backed resolver.

use cadence_document::Element;
use cadence_model::{ComponentKind, ComponentNode, ComponentTree, PortDescriptor};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The shape a factory is asked to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructShape {
    Entity,
    Director,
    Attribute,
}

impl fmt::Display for ConstructShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entity => "an entity",
            Self::Director => "a director",
            Self::Attribute => "an attribute",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("class not found: {0}")]
    ClassNotFound(String),

    #[error("class '{class_name}' cannot be constructed as {shape}")]
    NoConstructor {
        class_name: String,
        shape: ConstructShape,
    },

    #[error("no document defines class: {0}")]
    DocumentNotFound(String),

    #[error("construction of '{class_name}' failed: {message}")]
    ConstructionFailed { class_name: String, message: String },
}

/// Arguments handed to a factory: the new component's name and the dotted
/// path of the container it will be placed in, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructRequest<'a> {
    pub name: &'a str,
    pub container: Option<&'a str>,
}

/// Builds fresh component trees for one class.
///
/// Each shape defaults to [`ResolveError::NoConstructor`]; implementors
/// override the shapes their class supports.
pub trait ComponentFactory: Send + Sync {
    fn class_name(&self) -> &str;

    fn construct_entity(&self, _request: &ConstructRequest<'_>) -> Result<ComponentTree, ResolveError> {
        Err(self.unsupported(ConstructShape::Entity))
    }

    fn construct_director(&self, _request: &ConstructRequest<'_>) -> Result<ComponentTree, ResolveError> {
        Err(self.unsupported(ConstructShape::Director))
    }

    fn construct_attribute(&self, _request: &ConstructRequest<'_>) -> Result<ComponentTree, ResolveError> {
        Err(self.unsupported(ConstructShape::Attribute))
    }

    fn unsupported(&self, shape: ConstructShape) -> ResolveError {
        ResolveError::NoConstructor {
            class_name: self.class_name().to_string(),
            shape,
        }
    }
}

/// Looks up component classes by name.
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, class_name: &str) -> Result<Arc<dyn ComponentFactory>, ResolveError>;

    /// Raw text of a document defining `class_name` as a standalone entity.
    fn locate_document_for(&self, class_name: &str) -> Result<String, ResolveError>;

    /// Human-readable description of where classes are looked up, used in
    /// diagnostics.
    fn search_hint(&self) -> String;
}

/// A class the catalog can construct, with the ports and attributes every
/// fresh instance starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBinding {
    pub class_name: String,
    pub kind: ComponentKind,
    pub ports: Vec<PortDescriptor>,
    pub attributes: Vec<Element>,
}

impl ClassBinding {
    /// A binding whose kind is classified from the class name.
    pub fn new(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        Self {
            kind: ComponentKind::classify(&class_name),
            class_name,
            ports: Vec::new(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: PortDescriptor) -> Self {
        self.ports.push(port);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Element) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn instantiate(&self, request: &ConstructRequest<'_>) -> ComponentTree {
        let mut node = ComponentNode::new(request.name, self.class_name.as_str(), self.kind);
        node.ports = self.ports.clone();
        node.attributes = self.attributes.clone();
        ComponentTree::new(node)
    }
}

impl ComponentFactory for ClassBinding {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn construct_entity(&self, request: &ConstructRequest<'_>) -> Result<ComponentTree, ResolveError> {
        if !self.kind.is_entity() {
            return Err(self.unsupported(ConstructShape::Entity));
        }
        Ok(self.instantiate(request))
    }

    fn construct_director(&self, request: &ConstructRequest<'_>) -> Result<ComponentTree, ResolveError> {
        if self.kind != ComponentKind::Director {
            return Err(self.unsupported(ConstructShape::Director));
        }
        Ok(self.instantiate(request))
    }

    fn construct_attribute(&self, request: &ConstructRequest<'_>) -> Result<ComponentTree, ResolveError> {
        if self.kind != ComponentKind::Attribute {
            return Err(self.unsupported(ConstructShape::Attribute));
        }
        Ok(self.instantiate(request))
    }
}

/// In-process table of class bindings and class documents.
#[derive(Default, Clone)]
pub struct TypeCatalog {
    bindings: HashMap<String, Arc<ClassBinding>>,
    documents: HashMap<String, String>,
    search_path: Vec<String>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding, replacing any previous binding for the class.
    pub fn register(&mut self, binding: ClassBinding) {
        self.bindings
            .insert(binding.class_name.clone(), Arc::new(binding));
    }

    #[must_use]
    pub fn with_binding(mut self, binding: ClassBinding) -> Self {
        self.register(binding);
        self
    }

    /// Registers the document that defines `class_name`.
    pub fn register_document(&mut self, class_name: impl Into<String>, document: impl Into<String>) {
        self.documents.insert(class_name.into(), document.into());
    }

    #[must_use]
    pub fn with_document(mut self, class_name: impl Into<String>, document: impl Into<String>) -> Self {
        self.register_document(class_name, document);
        self
    }

    /// Records a location reported in diagnostics.
    pub fn add_search_root(&mut self, root: impl Into<String>) {
        self.search_path.push(root.into());
    }

    pub fn binding(&self, class_name: &str) -> Option<&ClassBinding> {
        self.bindings.get(class_name).map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("bindings", &self.bindings.len())
            .field("documents", &self.documents.len())
            .field("search_path", &self.search_path)
            .finish()
    }
}

impl TypeResolver for TypeCatalog {
    fn resolve(&self, class_name: &str) -> Result<Arc<dyn ComponentFactory>, ResolveError> {
        self.bindings
            .get(class_name)
            .map(|binding| Arc::clone(binding) as Arc<dyn ComponentFactory>)
            .ok_or_else(|| ResolveError::ClassNotFound(class_name.to_string()))
    }

    fn locate_document_for(&self, class_name: &str) -> Result<String, ResolveError> {
        self.documents
            .get(class_name)
            .cloned()
            .ok_or_else(|| ResolveError::DocumentNotFound(class_name.to_string()))
    }

    fn search_hint(&self) -> String {
        let summary = format!(
            "type catalog with {} bindings and {} documents",
            self.bindings.len(),
            self.documents.len()
        );
        if self.search_path.is_empty() {
            summary
        } else {
            format!("{summary} [{}]", self.search_path.join(", "))
        }
    }
}
