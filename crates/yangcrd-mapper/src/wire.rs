//! # Wire-Compatible Conversion
//!
//! The two entry points used around the XML codec: external instances are
//! mapped to canonical form and namespace-augmented before encoding, and
//! decoded canonical instances are mapped back to external form.

use std::collections::BTreeMap;

use serde_json::Value;

use yangcrd_core::{select_list_entry, CrdError, SchemaNode};

use crate::mapper::{map_instance, Direction};
use crate::namespace::{augment, NamespaceIndex};

/// Map an external instance to canonical form and add namespace attributes.
///
/// An empty `namespaces` mapping skips augmentation.
pub fn to_wire_compatible(value: &Value, node: &SchemaNode, namespaces: &BTreeMap<String, String>) -> Value {
    let canonical = map_instance(value, node, Direction::ToInternal);
    if namespaces.is_empty() {
        return canonical;
    }
    augment(&canonical, &NamespaceIndex::new(namespaces))
}

/// Map a decoded canonical instance to external form.
pub fn from_wire_compatible(value: &Value, node: &SchemaNode) -> Value {
    map_instance(value, node, Direction::ToExternal)
}

/// A list entry resolved for wire conversion, with its namespace.
#[derive(Debug, Clone, Copy)]
pub struct WireTarget<'a> {
    pub node: &'a SchemaNode,
    pub namespace: Option<&'a str>,
}

impl<'a> WireTarget<'a> {
    /// Resolve `container`/`list` inside `module`.
    ///
    /// # Errors
    ///
    /// [`CrdError::NodeNotFound`] or [`CrdError::InvalidNode`] from the strict
    /// list lookup.
    pub fn resolve(module: &'a SchemaNode, container: &str, list: &str) -> Result<Self, CrdError> {
        let (node, namespace) = select_list_entry(module, container, list)?;
        Ok(Self { node, namespace })
    }

    pub fn to_wire(&self, value: &Value, namespaces: &BTreeMap<String, String>) -> Value {
        to_wire_compatible(value, self.node, namespaces)
    }

    pub fn from_wire(&self, value: &Value) -> Value {
        from_wire_compatible(value, self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yangcrd_core::{TypeInfo, TypeKind};

    fn module() -> SchemaNode {
        SchemaNode::container(
            "example",
            [SchemaNode::container(
                "interfaces",
                [SchemaNode::list(
                    "interface",
                    "name",
                    [
                        SchemaNode::leaf("name", TypeInfo::new(TypeKind::String)),
                        SchemaNode::leaf("oper-status", TypeInfo::enumeration(["up", "down"])),
                    ],
                )],
            )],
        )
        .with_namespace("urn:example")
    }

    #[test]
    fn to_wire_maps_then_augments() {
        let module = module();
        let target = WireTarget::resolve(&module, "interfaces", "interface").unwrap();
        assert_eq!(target.namespace, Some("urn:example"));

        let namespaces = BTreeMap::from([("name".to_string(), "xmlns:if=urn:if".to_string())]);
        let out = target.to_wire(&json!({"Name": "eth0", "operStatus": "Up"}), &namespaces);
        assert_eq!(
            out,
            json!({"name": {"-xmlns:if": "urn:if", "#text": "eth0"}, "oper-status": "up"})
        );
    }

    #[test]
    fn to_wire_without_namespaces_is_plain_mapping() {
        let module = module();
        let target = WireTarget::resolve(&module, "interfaces", "interface").unwrap();
        let out = target.to_wire(&json!({"name": "eth0"}), &BTreeMap::new());
        assert_eq!(out, json!({"name": "eth0"}));
    }

    #[test]
    fn from_wire_unwraps_text_and_renames() {
        let module = module();
        let target = WireTarget::resolve(&module, "interfaces", "interface").unwrap();
        let out = target.from_wire(&json!({"name": {"-xmlns:if": "urn:if", "#text": "eth0"}, "oper-status": "down"}));
        assert_eq!(out, json!({"name": "eth0", "operStatus": "Down"}));
    }

    #[test]
    fn resolve_rejects_wrong_kinds() {
        let module = module();
        assert!(matches!(
            WireTarget::resolve(&module, "interfaces", "missing").unwrap_err(),
            CrdError::NodeNotFound(_)
        ));
        assert!(matches!(
            WireTarget::resolve(&module, "nope", "interface").unwrap_err(),
            CrdError::NodeNotFound(_)
        ));
    }
}
