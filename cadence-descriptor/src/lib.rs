//! Descriptor engine for Cadence components.
//!
//! Two ways in, one way out:
//! - [`parse_descriptor`] reads a descriptor document
//! - [`introspect`] reads a live component
//! - [`serialize`] writes a descriptor back in canonical section order
//!
//! [`resolve_class`] and [`materialize`] turn a descriptor into a live
//! component through a [`TypeResolver`].

mod error;
mod instantiate;
mod introspect;
mod materialize;
mod parser;
mod resolver;
mod serializer;
mod strategy;

pub use error::{ClassResolutionError, DescriptorError, DescriptorResult, StrategyFailure};
pub use instantiate::{node_to_element, tree_from_document, tree_from_element};
pub use introspect::introspect;
pub use materialize::{Materialized, materialize};
pub use parser::{descriptor_from_element, parse_descriptor};
pub use resolver::{
    ClassBinding, ComponentFactory, ConstructRequest, ConstructShape, ResolveError, TypeCatalog,
    TypeResolver,
};
pub use serializer::{SerializeOptions, serialize, to_element};
pub use strategy::{
    ResolutionContext, ResolutionStrategy, StrategyError, resolve_class, resolve_class_or_none,
    strategies,
};
