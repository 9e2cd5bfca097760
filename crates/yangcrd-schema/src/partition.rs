//! # Config Partitioner
//!
//! Selects the read-only part of a subtree for status compilation.
//!
//! Read-only is inherited downward: once a node is `config false`, it and
//! everything beneath it are emitted with the normal rules from
//! [`crate::compile`]. Above that boundary, writable nodes survive only as
//! the path to a read-only descendant.

use std::collections::BTreeMap;

use yangcrd_core::{to_display_name, CrdError, NodeKind, SchemaNode};

use crate::compile::{collect_properties, emit_node, required_keys};
use crate::fragment::{Properties, SchemaFragment};

/// Build the status fragment rooted at `root`.
///
/// `required` is emitted only when `root` itself is read-only.
///
/// # Errors
///
/// [`CrdError::NoMappableFields`] if nothing under `root` is read-only.
pub(crate) fn status_fragment(root: &SchemaNode) -> Result<SchemaFragment, CrdError> {
    let Some(children) = root.children() else {
        return Err(CrdError::invalid_node(&root.name, "node has no children"));
    };

    let mut properties = Properties::new();
    let fragment = if root.is_read_only() {
        collect_properties(children, &mut properties);
        SchemaFragment::object(properties).with_required(required_keys(root))
    } else {
        partition_children(children, &mut properties);
        SchemaFragment::object(properties)
    };

    match fragment.properties.as_ref() {
        Some(p) if !p.is_empty() => Ok(fragment),
        _ => Err(CrdError::NoMappableFields {
            node: root.name.clone(),
        }),
    }
}

fn partition_children(children: &BTreeMap<String, SchemaNode>, properties: &mut Properties) {
    for child in children.values() {
        match &child.kind {
            NodeKind::Rpc(_) => {}
            _ if child.is_read_only() => match &child.kind {
                NodeKind::Choice { cases } => collect_properties(cases, properties),
                NodeKind::Case { children } => collect_properties(children, properties),
                _ => {
                    properties.insert(to_display_name(&child.name, false), emit_node(child));
                }
            },
            _ if !child.has_read_only_descendant() => {
                tracing::debug!(node = %child.name, "pruning writable subtree from status");
            }
            NodeKind::Choice { cases } => partition_children(cases, properties),
            NodeKind::Case { children } => partition_children(children, properties),
            NodeKind::Container { children } => {
                let mut nested = Properties::new();
                partition_children(children, &mut nested);
                properties.insert(to_display_name(&child.name, false), SchemaFragment::object(nested));
            }
            NodeKind::List { children, .. } => {
                let mut nested = Properties::new();
                partition_children(children, &mut nested);
                properties.insert(
                    to_display_name(&child.name, false),
                    SchemaFragment::array(SchemaFragment::object(nested)),
                );
            }
            // Writable leaves have no descendants and were pruned above.
            NodeKind::Leaf { .. } | NodeKind::LeafList { .. } => {}
        }
    }
}
