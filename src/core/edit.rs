//! Declarative property edits
//!
//! An [`EditOperation`] describes one change to apply uniformly to the front
//! matter of every selected document. Applying it to a single
//! [`FrontmatterBlock`] is a pure function; reading and writing documents is
//! the job of the batch engine.

use crate::core::front_matter::FrontmatterBlock;
use crate::core::value::{split_list_input, PropertyType, PropertyValue};
use crate::error::{PersonoteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of change an edit makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    /// Create the property or merge new values into it
    Add,
    /// Overwrite an existing property
    Replace,
    /// Remove the property entirely
    Delete,
}

impl EditKind {
    /// Past tense verb for notices ("Added", "Replaced", "Deleted")
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Add => "Added",
            Self::Replace => "Replaced",
            Self::Delete => "Deleted",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Replace => write!(f, "replace"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One property edit, applied to every document of a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOperation {
    pub kind: EditKind,
    pub property_name: String,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub property_value: String,
}

impl EditOperation {
    pub fn new(
        kind: EditKind,
        property_name: impl Into<String>,
        property_type: PropertyType,
        property_value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            property_name: property_name.into(),
            property_type,
            property_value: property_value.into(),
        }
    }

    pub fn add(
        property_name: impl Into<String>,
        property_type: PropertyType,
        property_value: impl Into<String>,
    ) -> Self {
        Self::new(EditKind::Add, property_name, property_type, property_value)
    }

    pub fn replace(
        property_name: impl Into<String>,
        property_type: PropertyType,
        property_value: impl Into<String>,
    ) -> Self {
        Self::new(EditKind::Replace, property_name, property_type, property_value)
    }

    pub fn delete(property_name: impl Into<String>) -> Self {
        Self::new(EditKind::Delete, property_name, PropertyType::Scalar, "")
    }

    /// Reject operations that cannot mean anything for any document
    pub fn validate(&self) -> Result<()> {
        let name = self.property_name.trim();
        if name.is_empty() {
            return Err(PersonoteError::invalid_operation("property name is empty"));
        }
        if name != self.property_name {
            return Err(PersonoteError::invalid_operation(format!(
                "property name '{}' has surrounding whitespace",
                self.property_name
            )));
        }
        Ok(())
    }

    /// The values this operation brings in, as merge input
    fn incoming_values(&self) -> Vec<String> {
        match self.property_type {
            PropertyType::List => split_list_input(&self.property_value),
            PropertyType::Scalar if self.property_value.is_empty() => Vec::new(),
            PropertyType::Scalar => vec![self.property_value.clone()],
        }
    }

    /// Apply this operation to one block, returning whether it changed.
    pub fn apply(&self, block: &mut FrontmatterBlock) -> bool {
        let name = self.property_name.as_str();
        let before = block.get(name).cloned();

        match self.kind {
            EditKind::Add => {
                let updated = match block.remove(name) {
                    None => PropertyValue::from_input(&self.property_value, self.property_type),
                    Some(existing) => existing.merge(self.incoming_values()),
                };
                block.insert(name, updated);
            }
            EditKind::Replace => {
                if block.contains(name) {
                    block.insert(
                        name,
                        PropertyValue::from_input(&self.property_value, self.property_type),
                    );
                }
            }
            EditKind::Delete => {
                block.remove(name);
            }
        }

        block.get(name) != before.as_ref()
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EditKind::Delete => write!(f, "{} \"{}\"", self.kind, self.property_name),
            _ => write!(
                f,
                "{} {} \"{}\" = \"{}\"",
                self.kind, self.property_type, self.property_name, self.property_value
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block_with(name: &str, value: PropertyValue) -> FrontmatterBlock {
        let mut block = FrontmatterBlock::new();
        block.insert(name, value);
        block
    }

    #[test]
    fn test_add_creates_absent_property() {
        let mut block = FrontmatterBlock::new();
        assert!(EditOperation::add("tags", PropertyType::List, "a, b,").apply(&mut block));
        assert_eq!(block.get("tags"), Some(&PropertyValue::list(["a", "b"])));

        let mut block = FrontmatterBlock::new();
        EditOperation::add("state", PropertyType::Scalar, "California").apply(&mut block);
        assert_eq!(block.get("state"), Some(&PropertyValue::scalar("California")));
    }

    #[test]
    fn test_add_merges_in_first_seen_order() {
        let mut block = block_with("tags", PropertyValue::list(["a", "b"]));
        EditOperation::add("tags", PropertyType::List, "b,c").apply(&mut block);
        assert_eq!(block.get("tags"), Some(&PropertyValue::list(["a", "b", "c"])));
    }

    #[test]
    fn test_add_is_idempotent() {
        let op = EditOperation::add("tags", PropertyType::List, "x, y");
        let mut block = block_with("tags", PropertyValue::list(["a"]));
        assert!(op.apply(&mut block));
        let once = block.clone();
        assert!(!op.apply(&mut block));
        assert_eq!(block, once);
    }

    #[test]
    fn test_add_promotes_scalar() {
        let mut block = block_with("family", PropertyValue::scalar("Smith"));
        EditOperation::add("family", PropertyType::List, "Jones, Smith").apply(&mut block);
        assert_eq!(
            block.get("family"),
            Some(&PropertyValue::list(["Smith", "Jones"]))
        );

        let mut block = block_with("family", PropertyValue::scalar("Smith"));
        EditOperation::add("family", PropertyType::Scalar, "Jones, Jr.").apply(&mut block);
        assert_eq!(
            block.get("family"),
            Some(&PropertyValue::list(["Smith", "Jones, Jr."]))
        );
    }

    #[test]
    fn test_replace_only_touches_existing() {
        let mut block = FrontmatterBlock::new();
        assert!(!EditOperation::replace("state", PropertyType::Scalar, "NY").apply(&mut block));
        assert!(block.is_empty());

        let mut block = block_with("state", PropertyValue::list(["CA", "OR"]));
        assert!(EditOperation::replace("state", PropertyType::Scalar, "NY").apply(&mut block));
        assert_eq!(block.get("state"), Some(&PropertyValue::scalar("NY")));

        let mut block = block_with("tags", PropertyValue::scalar("old"));
        EditOperation::replace("tags", PropertyType::List, "x,y,x").apply(&mut block);
        assert_eq!(block.get("tags"), Some(&PropertyValue::list(["x", "y"])));
    }

    #[test]
    fn test_delete_is_total() {
        let mut block = block_with("state", PropertyValue::scalar("CA"));
        assert!(!EditOperation::delete("missing").apply(&mut block));
        assert_eq!(block.len(), 1);
        assert!(EditOperation::delete("state").apply(&mut block));
        assert!(!block.contains("state"));
    }

    #[test]
    fn test_validate() {
        assert!(EditOperation::delete("tags").validate().is_ok());
        assert!(matches!(
            EditOperation::delete("").validate(),
            Err(PersonoteError::InvalidOperation { .. })
        ));
        assert!(EditOperation::delete(" tags").validate().is_err());
    }
}
