//! # Namespace Augmenter
//!
//! Injects XML namespace attributes into a canonical instance before it is
//! handed to an XML-oriented encoder.
//!
//! The index is a trie over dotted paths (`interfaces.interface.name`), each
//! segment folded with [`fold_key`]. A path whose trie node carries an
//! `xmlns...=uri` entry gets the attribute:
//!
//! - objects gain a sibling key `-xmlns...`;
//! - scalars are promoted to `{"-xmlns...": uri, "#text": scalar}`;
//! - array items are augmented under the array's own path.
//!
//! Only top-level keys that start a path in the index are visited at all.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use yangcrd_core::fold_key;

use crate::{ATTRIBUTE_PREFIX, TEXT_KEY};

/// A parsed `xmlns[:prefix]=uri` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceAttribute {
    /// Attribute key as emitted, including the `-` prefix.
    pub key: String,
    pub value: String,
}

impl NamespaceAttribute {
    /// Parse `xmlns:ns=urn:x`. Returns `None` unless the entry has exactly
    /// one `=` and the name starts with `xmlns`.
    pub fn parse(entry: &str) -> Option<Self> {
        let mut parts = entry.split('=');
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        if !name.starts_with("xmlns") {
            return None;
        }
        Some(Self {
            key: format!("{ATTRIBUTE_PREFIX}{name}"),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<String, TrieNode>,
    entry: Option<String>,
}

/// Immutable path index of namespace entries.
#[derive(Debug, Clone, Default)]
pub struct NamespaceIndex {
    root: TrieNode,
    len: usize,
}

impl NamespaceIndex {
    /// Build an index from `path → "attribute=value"` pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut index = Self::default();
        for (path, entry) in entries {
            let mut node = &mut index.root;
            for segment in path.as_ref().split('.') {
                node = node.children.entry(fold_key(segment)).or_default();
            }
            if node.entry.replace(entry.into()).is_none() {
                index.len += 1;
            }
        }
        index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a path in the index starts at top-level key `key`.
    pub fn present(&self, key: &str) -> bool {
        self.root.children.contains_key(&fold_key(key))
    }

    /// The entry stored at the dotted `path`, if any.
    pub fn find(&self, path: &str) -> Option<&str> {
        let mut node = &self.root;
        for segment in path.split('.') {
            node = node.children.get(&fold_key(segment))?;
        }
        node.entry.as_deref()
    }

    fn attribute(&self, path: &str) -> Option<NamespaceAttribute> {
        let entry = self.find(path)?;
        let attribute = NamespaceAttribute::parse(entry);
        if attribute.is_none() {
            tracing::warn!(path, entry, "ignoring namespace entry that is not an xmlns attribute");
        }
        attribute
    }
}

/// Augment `value` with the namespace attributes in `index`.
///
/// Non-object values and an empty index leave `value` unchanged.
pub fn augment(value: &Value, index: &NamespaceIndex) -> Value {
    let Value::Object(object) = value else {
        return value.clone();
    };
    if index.is_empty() {
        return value.clone();
    }

    let augmented = object
        .iter()
        .map(|(key, child)| {
            let child = if index.present(key) {
                augment_path(index, key, child)
            } else {
                child.clone()
            };
            (key.clone(), child)
        })
        .collect();
    Value::Object(augmented)
}

fn augment_path(index: &NamespaceIndex, path: &str, value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut output = Map::with_capacity(object.len() + 1);
            if let Some(attribute) = index.attribute(path) {
                output.insert(attribute.key, Value::String(attribute.value));
            }
            for (key, child) in object {
                output.insert(key.clone(), augment_path(index, &format!("{path}.{key}"), child));
            }
            Value::Object(output)
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| augment_path(index, path, item)).collect()),
        Value::Null => Value::Null,
        scalar => match index.attribute(path) {
            Some(attribute) => {
                let mut output = Map::with_capacity(2);
                output.insert(attribute.key, Value::String(attribute.value));
                output.insert(TEXT_KEY.to_string(), scalar.clone());
                Value::Object(output)
            }
            None => scalar.clone(),
        },
    }
}
