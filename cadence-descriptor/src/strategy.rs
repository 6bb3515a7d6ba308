//! Class resolution: an ordered chain of named strategies.
//!
//! Each strategy either builds a fresh tree for the descriptor's class or
//! fails with a reason. The chain stops at the first success; if every
//! strategy fails, all reasons are returned together.

use crate::error::{ClassResolutionError, DescriptorError, StrategyFailure};
use crate::instantiate::tree_from_element;
use crate::resolver::{ConstructRequest, ResolveError, TypeResolver};
use crate::serializer::{SerializeOptions, to_element};
use cadence_document::{parse_document, write_document};
use cadence_model::{ComponentDescriptor, ComponentKind, ComponentTree};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Why one strategy could not produce a tree.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Descriptor(Box<DescriptorError>),

    #[error("not applicable: {0}")]
    NotApplicable(String),
}

impl From<DescriptorError> for StrategyError {
    fn from(error: DescriptorError) -> Self {
        Self::Descriptor(Box::new(error))
    }
}

/// Inputs shared by every strategy.
pub struct ResolutionContext<'a> {
    pub resolver: &'a dyn TypeResolver,
    /// Dotted path of the container the result is destined for.
    pub container: Option<&'a str>,
}

type StrategyFn =
    fn(&ComponentDescriptor, &ResolutionContext<'_>) -> Result<ComponentTree, StrategyError>;

/// A named step of the resolution chain.
pub struct ResolutionStrategy {
    name: &'static str,
    run: StrategyFn,
}

impl ResolutionStrategy {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(
        &self,
        descriptor: &ComponentDescriptor,
        context: &ResolutionContext<'_>,
    ) -> Result<ComponentTree, StrategyError> {
        (self.run)(descriptor, context)
    }
}

static STRATEGIES: [ResolutionStrategy; 4] = [
    ResolutionStrategy {
        name: "direct-construction",
        run: direct_construction,
    },
    ResolutionStrategy {
        name: "nested-document",
        run: nested_document,
    },
    ResolutionStrategy {
        name: "director-construction",
        run: director_construction,
    },
    ResolutionStrategy {
        name: "attribute-construction",
        run: attribute_construction,
    },
];

/// The resolution chain, in the order it is tried.
pub fn strategies() -> &'static [ResolutionStrategy] {
    &STRATEGIES
}

/// Builds a fresh tree for the descriptor's class.
///
/// The returned tree is not yet stamped with the descriptor's identity; see
/// [`materialize`](crate::materialize) for that.
pub fn resolve_class(
    descriptor: &ComponentDescriptor,
    resolver: &dyn TypeResolver,
    container: Option<&str>,
) -> Result<ComponentTree, ClassResolutionError> {
    let context = ResolutionContext {
        resolver,
        container,
    };
    let mut causes = Vec::new();

    for strategy in strategies() {
        match strategy.run(descriptor, &context) {
            Ok(tree) => {
                debug!(
                    class = %descriptor.class_name(),
                    strategy = strategy.name(),
                    failed_before = causes.len(),
                    "class resolved"
                );
                return Ok(tree);
            }
            Err(error) => {
                trace!(
                    class = %descriptor.class_name(),
                    strategy = strategy.name(),
                    error = %error,
                    "resolution strategy failed"
                );
                causes.push(StrategyFailure {
                    strategy: strategy.name(),
                    message: error.to_string(),
                });
            }
        }
    }

    Err(ClassResolutionError {
        class_name: descriptor.class_name().to_string(),
        search_hint: resolver.search_hint(),
        causes,
    })
}

/// Like [`resolve_class`], but a failure is logged and swallowed.
pub fn resolve_class_or_none(
    descriptor: &ComponentDescriptor,
    resolver: &dyn TypeResolver,
    container: Option<&str>,
) -> Option<ComponentTree> {
    match resolve_class(descriptor, resolver, container) {
        Ok(tree) => Some(tree),
        Err(error) => {
            warn!(
                class = %error.class_name,
                search_hint = %error.search_hint,
                causes = error.causes.len(),
                "{error}"
            );
            None
        }
    }
}

fn request<'a>(descriptor: &'a ComponentDescriptor, context: &ResolutionContext<'a>) -> ConstructRequest<'a> {
    ConstructRequest {
        name: descriptor.name(),
        container: context.container,
    }
}

fn direct_construction(
    descriptor: &ComponentDescriptor,
    context: &ResolutionContext<'_>,
) -> Result<ComponentTree, StrategyError> {
    let factory = context.resolver.resolve(descriptor.class_name())?;
    Ok(factory.construct_entity(&request(descriptor, context))?)
}

fn nested_document(
    descriptor: &ComponentDescriptor,
    context: &ResolutionContext<'_>,
) -> Result<ComponentTree, StrategyError> {
    if descriptor.is_class_definition() {
        // Links are carried as raw markup, so go through text to get them
        // back as elements.
        let text = write_document(&to_element(descriptor, &SerializeOptions::default()));
        let root = parse_document(&text).map_err(DescriptorError::from)?;
        return Ok(tree_from_element(&root)?);
    }

    if descriptor.kind() != ComponentKind::Composite {
        return Err(StrategyError::NotApplicable(format!(
            "'{}' is neither a composite container nor a class definition",
            descriptor.internal_class_name()
        )));
    }

    if let Some(prototype) = descriptor.prototype() {
        return Ok(prototype.snapshot());
    }

    let text = context
        .resolver
        .locate_document_for(descriptor.class_name())?;
    let root = parse_document(&text).map_err(DescriptorError::from)?;
    Ok(tree_from_element(&root)?)
}

fn director_construction(
    descriptor: &ComponentDescriptor,
    context: &ResolutionContext<'_>,
) -> Result<ComponentTree, StrategyError> {
    let factory = context.resolver.resolve(descriptor.class_name())?;
    Ok(factory.construct_director(&request(descriptor, context))?)
}

fn attribute_construction(
    descriptor: &ComponentDescriptor,
    context: &ResolutionContext<'_>,
) -> Result<ComponentTree, StrategyError> {
    let factory = context.resolver.resolve(descriptor.class_name())?;
    Ok(factory.construct_attribute(&request(descriptor, context))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::TypeCatalog;
    use cadence_model::{ComponentNode, LiveComponent};
    use cadence_types::Identifier;

    fn with_prototype(internal: &str) -> ComponentDescriptor {
        let mut descriptor = ComponentDescriptor::new(
            "c",
            "org.example.C",
            internal,
            Identifier::local("actor", 1, 1),
        );
        let root = ComponentNode::new("c", internal, ComponentKind::classify(internal));
        descriptor.set_prototype(Some(LiveComponent::new(ComponentTree::new(root))));
        descriptor
    }

    #[test]
    fn composite_prototype_is_snapshotted() {
        let catalog = TypeCatalog::new();
        let context = ResolutionContext {
            resolver: &catalog,
            container: None,
        };
        let descriptor = with_prototype("org.example.PipelineCompositeActor");
        let tree = nested_document(&descriptor, &context).unwrap();
        assert_eq!(tree.root_node().name, "c");
        assert_eq!(tree.root_node().kind, ComponentKind::Composite);
    }

    #[test]
    fn prototype_of_atomic_is_not_used() {
        let catalog = TypeCatalog::new();
        let context = ResolutionContext {
            resolver: &catalog,
            container: None,
        };
        let descriptor = with_prototype("ptolemy.actor.lib.Const");
        assert!(matches!(
            nested_document(&descriptor, &context),
            Err(StrategyError::NotApplicable(_))
        ));
    }

    #[test]
    fn chain_order_is_fixed() {
        let names: Vec<&str> = strategies().iter().map(ResolutionStrategy::name).collect();
        assert_eq!(
            names,
            vec![
                "direct-construction",
                "nested-document",
                "director-construction",
                "attribute-construction",
            ]
        );
    }
}
