//! Core types and domain logic
//!
//! Everything here is pure: no filesystem access and no logging side effects
//! beyond what the codec reports.

pub mod document;
pub mod edit;
pub mod front_matter;
pub mod selection;
pub mod value;

pub use document::{Document, DocumentRef};
pub use edit::{EditKind, EditOperation};
pub use front_matter::FrontmatterBlock;
pub use selection::{CheckState, SelectionNode, SelectionSet};
pub use value::{PropertyType, PropertyValue};
