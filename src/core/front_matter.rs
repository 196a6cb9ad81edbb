use crate::core::value::PropertyValue;
use std::collections::btree_map::{self, BTreeMap};

/// Decoded front matter: property name to value.
///
/// Keys are kept sorted so encoding the same block always produces the same
/// text. Properties that came from decoding keep their original YAML value,
/// which is written back as is until the property is inserted or removed.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterBlock {
    properties: BTreeMap<String, PropertyValue>,
    decoded: BTreeMap<String, serde_yaml::Value>,
    crlf: bool,
}

impl FrontmatterBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Insert or overwrite a property, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) -> Option<PropertyValue> {
        let name = name.into();
        self.decoded.remove(&name);
        self.properties.insert(name, value)
    }

    /// Insert a property read from a document, remembering its YAML form
    pub(crate) fn insert_decoded(&mut self, name: String, value: serde_yaml::Value) {
        self.properties
            .insert(name.clone(), PropertyValue::from_yaml(&value));
        self.decoded.insert(name, value);
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.decoded.remove(name);
        self.properties.remove(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PropertyValue> {
        self.properties.iter()
    }

    /// Line ending the block is written with
    pub fn line_ending(&self) -> &'static str {
        if self.crlf {
            "\r\n"
        } else {
            "\n"
        }
    }

    pub(crate) fn set_crlf(&mut self, crlf: bool) {
        self.crlf = crlf;
    }

    /// YAML value to write for one property
    fn yaml_value(&self, name: &str, value: &PropertyValue) -> serde_yaml::Value {
        match self.decoded.get(name) {
            Some(original) => original.clone(),
            None => value.to_yaml(),
        }
    }

    pub fn to_yaml(&self) -> serde_yaml::Value {
        let mut map = serde_yaml::Mapping::new();
        for (name, value) in &self.properties {
            map.insert(
                serde_yaml::Value::String(name.clone()),
                self.yaml_value(name, value),
            );
        }
        serde_yaml::Value::Mapping(map)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .properties
            .iter()
            .map(|(name, value)| {
                let json = self
                    .decoded
                    .get(name)
                    .and_then(|original| serde_json::to_value(original).ok())
                    .unwrap_or_else(|| value_to_json(value));
                (name.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

fn value_to_json(value: &PropertyValue) -> serde_json::Value {
    match value {
        PropertyValue::Scalar(s) => serde_json::Value::String(s.clone()),
        PropertyValue::List(items) => {
            serde_json::Value::Array(items.iter().cloned().map(serde_json::Value::String).collect())
        }
    }
}

// Equality is by property value only, not by how the block was spelled.
impl PartialEq for FrontmatterBlock {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties
    }
}

impl Eq for FrontmatterBlock {}

impl FromIterator<(String, PropertyValue)> for FrontmatterBlock {
    fn from_iter<T: IntoIterator<Item = (String, PropertyValue)>>(iter: T) -> Self {
        Self {
            properties: iter.into_iter().collect(),
            decoded: BTreeMap::new(),
            crlf: false,
        }
    }
}

impl<'a> IntoIterator for &'a FrontmatterBlock {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = btree_map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
