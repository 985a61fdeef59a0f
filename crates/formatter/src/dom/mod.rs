// ABOUTME: DOM manipulation and traversal utilities for Word-exported HTML.
// ABOUTME: Provides the arena document, its serializer, attribute rewriting and heading renumbering.

//! DOM utilities for HTML document manipulation.
//!
//! Markup is parsed tolerantly with html5ever (through `scraper`) and imported
//! into an arena [`Document`] that supports in-place mutation: attribute
//! rewriting, element replacement, and node queries by tag name or class token.

pub mod attributes;
pub mod headings;
mod serialize;
pub mod tree;

pub use attributes::{add_attributes, remove_attributes};
pub use headings::{increment_heading_levels, rename_element, RenumberReport};
pub use tree::{Document, Element, NodeData, NodeId};
