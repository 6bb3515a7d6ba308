//! Descriptor document tree for Cadence.
//!
//! Component descriptors travel as a small XML-like dialect. This crate reads
//! that dialect into an [`Element`] tree and writes trees back in a canonical
//! layout. It is deliberately not a general XML implementation: see
//! [`parse_document`] for what is understood.

mod element;
mod error;
mod reader;
mod writer;

pub use element::{Element, Node};
pub use error::{DocumentError, DocumentResult};
pub use reader::{MAX_NESTING, parse_document, parse_fragment};
pub use writer::{write_document, write_fragment};
