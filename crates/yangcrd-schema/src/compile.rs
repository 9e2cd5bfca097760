//! # Schema Compilation
//!
//! Recursive emission of a [`SchemaFragment`] from a schema subtree.
//!
//! ## Emission Rules
//!
//! - Containers become `object`s with `properties`; lists become `array`s of
//!   such objects, with `required` naming the declared keys in display form.
//! - Leaves map through the type table. Enumerations emit an `enum` list
//!   (boolean-like literals become `Enable`/`Disable`, others PascalCase) and
//!   are always `type: string`. Integers with one parseable range also emit
//!   `minimum`/`maximum`.
//! - Choices and cases are transparent: case children are expanded in place,
//!   cases in name order. If two cases contribute the same display name the
//!   first one is kept.
//! - Rpcs are skipped here; see [`crate::rpc`].

use std::collections::BTreeMap;

use yangcrd_core::{select_instance, to_display_name, CrdError, CrdOptions, NodeKind, SchemaNode, TypeInfo};

use crate::fragment::{CompiledFragment, Mode, Properties, SchemaFragment};
use crate::partition;

/// Boolean-like enumeration literals and the token each renders as.
const BOOLEAN_WORDS: &[(&str, &str)] = &[
    ("on", "Enable"),
    ("off", "Disable"),
    ("yes", "Enable"),
    ("no", "Disable"),
    ("true", "Enable"),
    ("false", "Disable"),
];

/// Compile the fragment for one container or list subtree.
///
/// # Errors
///
/// - [`CrdError::InvalidNode`] if `subtree` is neither a container nor a list.
/// - [`CrdError::NoMappableFields`] if a status compilation finds nothing
///   read-only.
pub fn compile(subtree: &SchemaNode, mode: Mode) -> Result<CompiledFragment, CrdError> {
    let children = match &subtree.kind {
        NodeKind::Container { children } | NodeKind::List { children, .. } => children,
        _ => {
            return Err(CrdError::invalid_node(
                &subtree.name,
                "only container and list nodes can be compiled",
            ))
        }
    };

    let schema = match mode {
        Mode::Spec => {
            let mut properties = Properties::new();
            collect_properties(children, &mut properties);
            SchemaFragment::object(properties).with_required(required_keys(subtree))
        }
        Mode::Status => partition::status_fragment(subtree)?,
    };

    tracing::debug!(node = %subtree.name, mode = mode.key(), "compiled fragment");
    Ok(CompiledFragment { mode, schema })
}

/// Resolve the root/instance selection from `options` and compile it in the
/// mode `options.config` selects.
pub fn compile_module(module: &SchemaNode, options: &CrdOptions) -> Result<CompiledFragment, CrdError> {
    let selection = select_instance(module, &options.root, &options.instance)?;
    compile(selection.node, Mode::from_config(options.config))
}

/// Emit every data node among `children` into `properties`, expanding
/// choices and cases in place and skipping rpcs.
pub(crate) fn collect_properties(children: &BTreeMap<String, SchemaNode>, properties: &mut Properties) {
    for child in children.values() {
        match &child.kind {
            NodeKind::Rpc(_) => {}
            NodeKind::Choice { cases } => collect_properties(cases, properties),
            NodeKind::Case { children } => collect_properties(children, properties),
            _ => {
                properties.insert(to_display_name(&child.name, false), emit_node(child));
            }
        }
    }
}

/// Emit one node with all of its descendants.
pub(crate) fn emit_node(node: &SchemaNode) -> SchemaFragment {
    match &node.kind {
        NodeKind::Container { children } | NodeKind::Choice { cases: children } | NodeKind::Case { children } => {
            let mut properties = Properties::new();
            collect_properties(children, &mut properties);
            SchemaFragment::object(properties)
        }
        NodeKind::List { children, .. } => {
            let mut properties = Properties::new();
            collect_properties(children, &mut properties);
            SchemaFragment::array(SchemaFragment::object(properties).with_required(required_keys(node)))
        }
        NodeKind::Leaf { type_info } => emit_type(type_info.as_ref()),
        NodeKind::LeafList { type_info, .. } => SchemaFragment::array(emit_type(type_info.as_ref())),
        NodeKind::Rpc(_) => SchemaFragment::scalar("boolean"),
    }
}

/// Emit the scalar schema for a leaf type.
pub(crate) fn emit_type(type_info: Option<&TypeInfo>) -> SchemaFragment {
    let Some(info) = type_info else {
        return SchemaFragment::scalar("string");
    };

    if info.is_enumeration() {
        let mut literals: Vec<String> = Vec::with_capacity(info.enum_values.len());
        for literal in &info.enum_values {
            let rendered = enum_display(literal);
            if !literals.contains(&rendered) {
                literals.push(rendered);
            }
        }
        return SchemaFragment {
            enum_values: literals,
            ..SchemaFragment::scalar("string")
        };
    }

    let schema_type = info.kind.schema_type();
    let mut fragment = SchemaFragment::scalar(schema_type);
    if schema_type == "integer" {
        if let Some((min, max)) = info.single_range() {
            fragment.minimum = Some(min);
            fragment.maximum = Some(max);
        }
    }
    fragment
}

/// Display spelling of an enumeration literal in a compiled schema.
pub fn enum_display(literal: &str) -> String {
    let lower = literal.to_lowercase();
    BOOLEAN_WORDS
        .iter()
        .find(|(word, _)| *word == lower)
        .map(|(_, token)| (*token).to_string())
        .unwrap_or_else(|| to_display_name(literal, true))
}

/// Display-form key names of a keyed list; empty for anything else.
pub(crate) fn required_keys(node: &SchemaNode) -> Vec<String> {
    match &node.kind {
        NodeKind::List { list, .. } => list.keys().into_iter().map(|k| to_display_name(k, false)).collect(),
        _ => Vec::new(),
    }
}
