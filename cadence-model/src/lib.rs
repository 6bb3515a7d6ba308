//! Component metadata model for Cadence.
//!
//! Defines the types the descriptor engine and the registry share:
//! - [`ComponentDescriptor`]: serializable metadata for a component (class,
//!   identity, ports, dependencies, semantic annotations, opaque attributes)
//! - [`PortDescriptor`] / [`PortDirection`]: port metadata
//! - [`ComponentKind`]: attribute / director / composite / atomic shape
//! - [`ComponentTree`] / [`LiveComponent`]: live component instances held in
//!   an index-addressed arena behind a shared handle

mod descriptor;
mod kind;
mod live;
mod port;
mod property;
mod tree;
pub mod vocabulary;

pub use descriptor::ComponentDescriptor;
pub use kind::{ComponentKind, is_composite_family};
pub use live::LiveComponent;
pub use port::{PortDescriptor, PortDirection};
pub use property::ClassedProperty;
pub use tree::{ComponentNode, ComponentTree, NodeIndex, Walk};
