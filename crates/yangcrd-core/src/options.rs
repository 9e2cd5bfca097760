//! # Run Configuration
//!
//! `CrdOptions` is the single configuration value for one compilation or
//! mapping run. It is constructed once by the caller and passed down by
//! reference; nothing below reads process-wide state.
//!
//! Layering, later sources overriding earlier ones:
//!
//! 1. [`CrdOptions::default`]
//! 2. a YAML config file ([`CrdOptions::load`])
//! 3. an inline `key=value,key=value` string ([`CrdOptions::apply_inline`])
//! 4. explicit values set by the caller

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CrdError;
use crate::model::SchemaNode;

/// Resource group used when none is configured.
pub const DEFAULT_GROUP: &str = "netconf.ciena.com";

/// Key reported for unkeyed nodes in config mode. Resources keyed this way
/// are not reconciled against the device.
pub const INTERNAL_KEY: &str = "internal";

/// Key reported for unkeyed nodes in status mode.
pub const STATUS_KEY: &str = "name";

/// Options for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrdOptions {
    /// Top-level node to start from.
    pub root: String,
    /// Node under `root` (or `root` itself) that one resource instance maps to.
    pub instance: String,
    /// Explicit resource name; derived from root/instance when empty.
    pub name: String,
    /// Resource group.
    pub group: String,
    /// Explicit key field, overriding the list's declared keys.
    pub key: String,
    /// `true` compiles the writable spec, `false` the read-only status.
    pub config: bool,
}

impl Default for CrdOptions {
    fn default() -> Self {
        Self {
            root: String::new(),
            instance: String::new(),
            name: String::new(),
            group: DEFAULT_GROUP.to_string(),
            key: String::new(),
            config: true,
        }
    }
}

impl CrdOptions {
    /// Parse options from a YAML document. Missing fields keep their defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self, CrdError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load options from a YAML config file.
    pub fn load(path: &Path) -> Result<Self, CrdError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Apply an inline option string such as `root=interfaces,instance=interface`.
    ///
    /// Recognized keys are `root`, `instance`, `name`, `key`, `group` and
    /// `config`. Malformed entries and unknown keys are ignored with a warning.
    pub fn apply_inline(&mut self, options: &str) {
        for part in options.split(',').filter(|p| !p.trim().is_empty()) {
            let mut kv = part.split('=');
            let (Some(k), Some(v), None) = (kv.next(), kv.next(), kv.next()) else {
                tracing::warn!(option = part, "ignoring invalid option");
                continue;
            };
            let (k, v) = (k.trim(), v.trim());
            match k {
                "root" => self.root = v.to_string(),
                "instance" => self.instance = v.to_string(),
                "name" => self.name = v.to_string(),
                "key" => self.key = v.to_string(),
                "group" => self.group = v.to_string(),
                "config" => match v.parse::<bool>() {
                    Ok(config) => self.config = config,
                    Err(_) => tracing::warn!(option = part, "ignoring non-boolean config option"),
                },
                _ => tracing::warn!(option = k, "ignoring unknown option"),
            }
        }
    }

    /// Whether this run compiles read-only status rather than writable spec.
    pub fn is_status(&self) -> bool {
        !self.config
    }

    /// The key field identifying one resource instance of `node`.
    ///
    /// An explicit `key` option wins. Otherwise a single declared list key is
    /// used; an unkeyed node gets `internal` in config mode and `name` in
    /// status mode.
    ///
    /// # Errors
    ///
    /// Returns [`CrdError::MultipleKeys`] if the node declares several keys
    /// and no override is configured.
    pub fn key_field(&self, node: &SchemaNode) -> Result<String, CrdError> {
        if !self.key.is_empty() {
            return Ok(self.key.clone());
        }
        let keys = node.list_info().map(|l| l.keys()).unwrap_or_default();
        match keys.as_slice() {
            [] if self.config => Ok(INTERNAL_KEY.to_string()),
            [] => Ok(STATUS_KEY.to_string()),
            [single] => Ok((*single).to_string()),
            _ => Err(CrdError::MultipleKeys {
                node: node.name.clone(),
                keys: keys.join(" "),
            }),
        }
    }
}
