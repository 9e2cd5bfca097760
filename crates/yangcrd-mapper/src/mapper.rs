//! # Data Mapper
//!
//! Translates instance data between canonical form (keyed by raw schema
//! names) and external form (keyed by camelCase display names), guided by a
//! schema subtree.
//!
//! ## Matching
//!
//! Input keys are matched against schema child names by [`fold_key`]
//! equality at every depth, so `Admin-State`, `admin_state` and `adminState`
//! all match the child `admin-state`. Input keys with no schema match are
//! dropped. Rpc children are never matched.
//!
//! ## Coercion
//!
//! - Integer targets truncate fractional numbers; decimal targets keep the
//!   number as given. Values beyond the `i64` range pass through unchanged.
//! - Towards external form, numbers at string-typed leaves become the text
//!   of their integral part.
//! - Enumeration values are fold-matched against the declared literals and
//!   re-spelled (raw literal internally, PascalCase externally). Unknown
//!   literals pass through unchanged.
//!
//! ## Leniency
//!
//! - An array at a node without list semantics drops the field.
//! - An object at a leaf yields its `#text` value, or an empty object.
//!
//! ## Choices
//!
//! Every case of a choice is mapped against the same parent object and the
//! results are merged into it. Cases are visited in name order and the first
//! case to produce a key keeps it.

use serde_json::{Map, Number, Value};

use yangcrd_core::{fold_key, to_display_name, NodeKind, SchemaNode, TypeInfo};

use crate::TEXT_KEY;

/// Which representation a mapping produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// External → canonical: output keys are raw schema names.
    ToInternal,
    /// Canonical → external: output keys are camelCase display names.
    ToExternal,
}

impl Direction {
    fn key_for(self, node: &SchemaNode) -> String {
        match self {
            Self::ToInternal => node.name.clone(),
            Self::ToExternal => to_display_name(&node.name, false),
        }
    }
}

/// Map `value` against `subtree` in the given direction.
///
/// Never fails: mismatches are resolved by the leniency rules in the module
/// documentation.
pub fn map_instance(value: &Value, subtree: &SchemaNode, direction: Direction) -> Value {
    map_value(subtree, value, direction).unwrap_or(Value::Null)
}

/// Map one value at `node`. `None` means the field is dropped.
fn map_value(node: &SchemaNode, value: &Value, direction: Direction) -> Option<Value> {
    match value {
        Value::Object(object) => Some(match node.children() {
            Some(_) => Value::Object(map_object(node, object, direction)),
            None => object
                .iter()
                .find(|(k, _)| k.as_str() == TEXT_KEY)
                .map(|(_, text)| text.clone())
                .unwrap_or_else(|| Value::Object(Map::new())),
        }),
        Value::Array(items) => {
            if node.list_info().is_none() {
                tracing::debug!(node = %node.name, "dropping array at non-list node");
                return None;
            }
            Some(Value::Array(
                items
                    .iter()
                    .filter_map(|item| map_value(node, item, direction))
                    .collect(),
            ))
        }
        Value::Number(n) => Some(coerce_number(n, node.type_info(), direction)),
        Value::String(s) => Some(Value::String(match node.type_info() {
            Some(info) if info.is_enumeration() => coerce_enum(s, info, direction),
            _ => s.clone(),
        })),
        Value::Bool(_) | Value::Null => Some(value.clone()),
    }
}

/// Map the children of a container, list entry, or case against `object`.
fn map_object(node: &SchemaNode, object: &Map<String, Value>, direction: Direction) -> Map<String, Value> {
    let mut output = Map::new();
    merge_children(node, object, direction, &mut output);
    output
}

fn merge_children(node: &SchemaNode, object: &Map<String, Value>, direction: Direction, output: &mut Map<String, Value>) {
    let Some(children) = node.children() else {
        return;
    };
    for child in children.values() {
        match &child.kind {
            NodeKind::Rpc(_) => {}
            NodeKind::Choice { cases } => {
                for case in cases.values() {
                    let mut result = Map::new();
                    merge_children(case, object, direction, &mut result);
                    merge_case(&child.name, result, output);
                }
            }
            NodeKind::Case { .. } => {
                let mut result = Map::new();
                merge_children(child, object, direction, &mut result);
                merge_case(&node.name, result, output);
            }
            _ => {
                let Some(value) = lookup_folded(object, &child.name) else {
                    continue;
                };
                if let Some(mapped) = map_value(child, value, direction) {
                    output.insert(direction.key_for(child), mapped);
                }
            }
        }
    }
}

fn merge_case(choice: &str, result: Map<String, Value>, output: &mut Map<String, Value>) {
    for (key, value) in result {
        if output.contains_key(&key) {
            tracing::debug!(choice, key = %key, "key already set by an earlier case; keeping first");
            continue;
        }
        output.insert(key, value);
    }
}

/// First entry of `object` whose key folds to the same value as `name`.
fn lookup_folded<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    let folded = fold_key(name);
    object
        .iter()
        .find(|(k, _)| fold_key(k) == folded)
        .map(|(_, v)| v)
}

fn coerce_number(n: &Number, type_info: Option<&TypeInfo>, direction: Direction) -> Value {
    let Some(info) = type_info else {
        return Value::Number(n.clone());
    };
    match info.kind.schema_type() {
        "integer" => integral(n).map_or_else(|| Value::Number(n.clone()), Value::from),
        "string" if direction == Direction::ToExternal => {
            Value::String(integral(n).map_or_else(|| n.to_string(), |i| i.to_string()))
        }
        _ => Value::Number(n.clone()),
    }
}

/// The integral part of `n`. `None` for unsigned values above `i64::MAX`
/// and for floats whose integral part does not fit an `i64`.
fn integral(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64().filter(|_| n.is_f64())?.trunc();
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        tracing::debug!(value = f, "number outside the integer range; passing through");
        None
    }
}

fn coerce_enum(literal: &str, info: &TypeInfo, direction: Direction) -> String {
    let folded = fold_key(literal);
    match info.enum_values.iter().find(|name| fold_key(name) == folded) {
        Some(name) => match direction {
            Direction::ToInternal => name.clone(),
            Direction::ToExternal => to_display_name(name, true),
        },
        None => {
            tracing::debug!(literal, "enumeration literal not declared; passing through");
            literal.to_string()
        }
    }
}
