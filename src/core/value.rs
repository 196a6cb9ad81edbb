//! Core value types for front matter properties
//!
//! A property is either a single text value or a duplicate-free, ordered list
//! of text values. This module provides the tagged union and the conversions
//! to and from YAML values used by the codec.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of one front matter property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A single text value
    Scalar(String),
    /// An ordered, duplicate-free sequence of text values
    List(Vec<String>),
}

impl PropertyValue {
    /// Create a scalar value
    pub fn scalar(s: impl Into<String>) -> Self {
        Self::Scalar(s.into())
    }

    /// Create a list value, dropping repeated elements (first seen wins)
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        union_into(&mut list, values.into_iter().map(Into::into));
        Self::List(list)
    }

    /// Check if this value is a scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check if this value is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Try to get the scalar text
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Try to get the list elements
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// The shape of this value
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Scalar(_) => PropertyType::Scalar,
            Self::List(_) => PropertyType::List,
        }
    }

    /// Turn this value into a list, keeping its content.
    ///
    /// An empty scalar becomes an empty list rather than a list holding `""`.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::Scalar(s) if s.is_empty() => Vec::new(),
            Self::Scalar(s) => vec![s],
            Self::List(items) => items,
        }
    }

    /// Union-merge `values` into this value, promoting a scalar to a list.
    pub fn merge<I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut list = Vec::new();
        union_into(&mut list, self.into_list());
        union_into(&mut list, values);
        Self::List(list)
    }

    /// Build a value of the requested type from raw user input.
    ///
    /// List input is split on `,`, each element trimmed, empty elements
    /// dropped. Scalar input is kept verbatim.
    pub fn from_input(input: &str, property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::Scalar => Self::scalar(input),
            PropertyType::List => Self::List(split_list_input(input)),
        }
    }

    /// Convert a decoded YAML value into a property value
    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Sequence(seq) => Self::list(seq.iter().map(yaml_to_text)),
            other => Self::Scalar(yaml_to_text(other)),
        }
    }

    /// Convert into a YAML value for encoding
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            Self::Scalar(s) => serde_yaml::Value::String(s.clone()),
            Self::List(items) => serde_yaml::Value::Sequence(
                items
                    .iter()
                    .map(|s| serde_yaml::Value::String(s.clone()))
                    .collect(),
            ),
        }
    }
}

/// The declared shape of a property in an edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    Scalar,
    List,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::List => write!(f, "list"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::scalar(s)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::list(values)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{}", s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Split comma separated input into trimmed, non-empty, unique elements
pub fn split_list_input(input: &str) -> Vec<String> {
    let mut list = Vec::new();
    union_into(
        &mut list,
        input
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string),
    );
    list
}

fn union_into<I>(target: &mut Vec<String>, values: I)
where
    I: IntoIterator<Item = String>,
{
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

fn yaml_to_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Tagged(tagged) => yaml_to_text(&tagged.value),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_creation() {
        let scalar = PropertyValue::scalar("California");
        assert!(scalar.is_scalar());
        assert_eq!(scalar.as_scalar(), Some("California"));

        let list = PropertyValue::list(["a", "b", "a"]);
        assert!(list.is_list());
        assert_eq!(list.as_list().unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_split_list_input() {
        assert_eq!(split_list_input(" a, b ,,c , a"), vec!["a", "b", "c"]);
        assert!(split_list_input(" , ").is_empty());
    }

    #[test]
    fn test_merge_preserves_first_seen_order() {
        let tags = PropertyValue::list(["a", "b"]);
        let merged = tags.merge(split_list_input("b,c"));
        assert_eq!(merged, PropertyValue::list(["a", "b", "c"]));
    }

    #[test]
    fn test_merge_promotes_scalar() {
        let family = PropertyValue::scalar("Smith");
        let merged = family.merge(vec!["Jones".to_string(), "Smith".to_string()]);
        assert_eq!(merged, PropertyValue::list(["Smith", "Jones"]));

        let empty = PropertyValue::scalar("");
        assert_eq!(
            empty.merge(vec!["x".to_string()]),
            PropertyValue::list(["x"])
        );
    }

    #[test]
    fn test_from_yaml() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("[rust, 42, rust, true]").unwrap();
        assert_eq!(
            PropertyValue::from_yaml(&yaml),
            PropertyValue::list(["rust", "42", "true"])
        );

        let yaml: serde_yaml::Value = serde_yaml::from_str("~").unwrap();
        assert_eq!(PropertyValue::from_yaml(&yaml), PropertyValue::scalar(""));

        let yaml: serde_yaml::Value = serde_yaml::from_str("{name: Jane}").unwrap();
        assert_eq!(
            PropertyValue::from_yaml(&yaml),
            PropertyValue::scalar(r#"{"name":"Jane"}"#)
        );
    }

    #[test]
    fn test_property_type_display() {
        assert_eq!(PropertyType::Scalar.to_string(), "scalar");
        assert_eq!(PropertyType::List.to_string(), "list");
    }
}
