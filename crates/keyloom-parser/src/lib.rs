//! Keyloom layout document parser.
//!
//! This crate reads the three kinds of keyboard layout document, one
//! document at a time:
//!
//! - [`catalog`]: the list of selectable keyboards
//! - [`geometry`]: sections, keys and outlines of one keyboard
//! - [`symbols`]: what each key produces, plus the includes a document needs
//!
//! Documents are read through a streaming push parser ([`markup`]) and every
//! element is checked against the nesting rules of its document kind
//! ([`grammar`]). Parsing stops at the first error.
//!
//! Following includes across documents and assembling the final keyboard
//! model is left to the caller.

pub mod attributes;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod grammar;
pub mod markup;
pub mod symbols;

pub use attributes::Attributes;
pub use catalog::parse_catalog;
pub use geometry::{GeometryResult, parse_geometry};
pub use markup::{MarkupHandler, MarkupParser};
pub use symbols::{parse_symbols, scan_includes};
