//! # Resource Descriptor
//!
//! Naming and identity of the resource a compiled fragment is embedded in:
//! kind, plural, short names and the key field used for reconciliation.

use serde::Serialize;

use yangcrd_core::{pluralize, select_instance, to_display_name, CrdError, CrdOptions, SchemaNode, INTERNAL_KEY};

/// Identity of one generated resource definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrdDescriptor {
    pub group: String,
    /// PascalCase resource kind.
    pub kind: String,
    pub plural: String,
    pub short_names: Vec<String>,
    pub root: String,
    pub instance: String,
    pub key_field: String,
    pub config: bool,
    /// Set for writable resources without a natural key; these are created
    /// but never reconciled against the device.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip_reconcile: bool,
}

/// Resolve the selection in `options` and derive the descriptor for it.
///
/// # Errors
///
/// Selection errors from [`select_instance`], and
/// [`CrdError::MultipleKeys`] from the key lookup.
pub fn describe(module: &SchemaNode, options: &CrdOptions) -> Result<CrdDescriptor, CrdError> {
    let selection = select_instance(module, &options.root, &options.instance)?;
    let key_field = options.key_field(selection.node)?;
    let kind = resource_kind(&selection.root, &selection.instance, &options.name);
    let short_names = short_names(&kind, options.is_status());

    Ok(CrdDescriptor {
        group: options.group.clone(),
        plural: pluralize(&kind),
        skip_reconcile: options.config && key_field == INTERNAL_KEY,
        short_names,
        root: selection.root,
        instance: selection.instance,
        key_field,
        config: options.config,
        kind,
    })
}

/// Resource kind for a selection.
///
/// An explicit name wins. Otherwise the instance name is used when the root
/// is just its plural (`interfaces`/`interface`), else the root name.
pub fn resource_kind(root: &str, instance: &str, explicit: &str) -> String {
    let base = if !explicit.is_empty() {
        explicit
    } else {
        let root_display = to_display_name(root, false).to_lowercase();
        let instance_display = to_display_name(instance, false).to_lowercase();
        if format!("{instance_display}s") == root_display {
            instance
        } else {
            root
        }
    };
    to_display_name(base, true)
}

/// Short names for a PascalCase kind. Status resources are prefixed `q`.
pub fn short_names(kind: &str, status: bool) -> Vec<String> {
    if kind.len() <= 5 {
        let mut short = pluralize(kind);
        if status && !short.starts_with('q') {
            short.insert(0, 'q');
        }
        return vec![short];
    }

    let mut short: String = kind
        .chars()
        .filter(char::is_ascii_uppercase)
        .collect::<String>()
        .to_lowercase();

    if short.is_empty() {
        let first = kind.chars().next().map(String::from).unwrap_or_default();
        return vec![format!("{first}s")];
    }

    if status && !short.starts_with('q') {
        short.insert(0, 'q');
    }

    if short.len() == 1 {
        return vec![kind.to_lowercase().chars().take(3).collect()];
    }

    if short.ends_with('s') {
        return vec![short];
    }
    let plural = format!("{short}s");
    vec![short, plural]
}
