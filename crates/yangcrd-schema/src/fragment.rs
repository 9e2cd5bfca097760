//! # Resource Schema Fragments
//!
//! In-memory form of the generated schema. The compiler builds a
//! [`SchemaFragment`] tree and serializes it once, so emission logic does not
//! depend on where the text ends up.
//!
//! Field order of [`SchemaFragment`] is the emission order: `properties`,
//! `items`, `enum`, `required`, `type`, `minimum`, `maximum`. Property order
//! is insertion order, which the compiler keeps lexicographic by raw schema
//! name.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use yangcrd_core::CrdError;

/// Which half of a resource definition a fragment describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Writable configuration.
    Spec,
    /// Read-only operational state.
    Status,
}

impl Mode {
    /// Top-level key the fragment is rendered under.
    pub fn key(self) -> &'static str {
        match self {
            Self::Spec => "spec",
            Self::Status => "status",
        }
    }

    /// `config == true` selects spec, `false` selects status.
    pub fn from_config(config: bool) -> Self {
        if config {
            Self::Spec
        } else {
            Self::Status
        }
    }
}

/// Ordered `properties` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Vec<(String, SchemaFragment)>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property. A name already present is kept and the new
    /// fragment is discarded; returns whether the property was added.
    pub fn insert(&mut self, name: String, fragment: SchemaFragment) -> bool {
        if self.0.iter().any(|(n, _)| *n == name) {
            tracing::debug!(property = %name, "duplicate property after flattening; keeping first");
            return false;
        }
        self.0.push((name, fragment));
        true
    }

    pub fn get(&self, name: &str) -> Option<&SchemaFragment> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Property names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaFragment)> {
        self.0.iter().map(|(n, f)| (n.as_str(), f))
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, fragment) in &self.0 {
            map.serialize_entry(name, fragment)?;
        }
        map.end()
    }
}

/// One node of a resource schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaFragment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaFragment>>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

impl SchemaFragment {
    /// A scalar of the given type word.
    pub fn scalar(schema_type: &'static str) -> Self {
        Self {
            schema_type,
            ..Self::default()
        }
    }

    /// An object with the given properties.
    pub fn object(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
            schema_type: "object",
            ..Self::default()
        }
    }

    /// An array of `items`.
    pub fn array(items: SchemaFragment) -> Self {
        Self {
            items: Some(Box::new(items)),
            schema_type: "array",
            ..Self::default()
        }
    }

    /// Attach a `required` list.
    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }

    /// Nested property lookup by display name.
    pub fn property(&self, name: &str) -> Option<&SchemaFragment> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }
}

/// The result of one compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFragment {
    pub mode: Mode,
    pub schema: SchemaFragment,
}

impl CompiledFragment {
    /// Render as YAML under a `spec:` or `status:` key, two spaces per level.
    pub fn to_yaml(&self) -> Result<String, CrdError> {
        let mut wrapper = serde_yaml::Mapping::new();
        wrapper.insert(
            serde_yaml::Value::String(self.mode.key().to_string()),
            serde_yaml::to_value(&self.schema)?,
        );
        Ok(serde_yaml::to_string(&wrapper)?)
    }

    /// The fragment as a JSON Schema document, without the wrapper key.
    pub fn to_json_schema(&self) -> Result<Value, CrdError> {
        Ok(serde_json::to_value(&self.schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompiledFragment {
        let mut props = Properties::new();
        props.insert("mtu".to_string(), SchemaFragment::scalar("integer"));
        props.insert("name".to_string(), SchemaFragment::scalar("string"));
        CompiledFragment {
            mode: Mode::Spec,
            schema: SchemaFragment::object(props).with_required(vec!["name".to_string()]),
        }
    }

    #[test]
    fn yaml_rendering_is_ordered_and_indented() {
        let yaml = sample().to_yaml().unwrap();
        let expected = "\
spec:
  properties:
    mtu:
      type: integer
    name:
      type: string
  required:
  - name
  type: object
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut props = Properties::new();
        props.insert("zeta".to_string(), SchemaFragment::scalar("string"));
        props.insert("alpha".to_string(), SchemaFragment::scalar("string"));
        assert_eq!(props.names(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn duplicate_property_keeps_first() {
        let mut props = Properties::new();
        assert!(props.insert("a".to_string(), SchemaFragment::scalar("string")));
        assert!(!props.insert("a".to_string(), SchemaFragment::scalar("integer")));
        assert_eq!(props.get("a").unwrap().schema_type, "string");
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn json_schema_has_no_wrapper() {
        let schema = sample().to_json_schema().unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["mtu"]["type"], "integer");
        assert_eq!(schema["required"][0], "name");
    }

    #[test]
    fn mode_keys() {
        assert_eq!(Mode::from_config(true), Mode::Spec);
        assert_eq!(Mode::from_config(false).key(), "status");
    }
}
