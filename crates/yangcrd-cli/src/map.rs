//! # Map Subcommand
//!
//! Maps an instance document against a list entry of a module.
//!
//! `to-internal` produces canonical (device) form, augmented with the
//! namespace attributes from `--namespaces` when given. `to-external`
//! produces the display-keyed resource form.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use yangcrd_mapper::WireTarget;

use crate::{emit, load_module, read_instance};

/// Target representation.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// Canonical form keyed by raw schema names.
    ToInternal,
    /// External form keyed by camelCase display names.
    ToExternal,
}

/// Arguments for the map subcommand.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Schema tree document.
    #[arg(long)]
    pub schema: PathBuf,

    /// Top-level container holding the list.
    #[arg(long)]
    pub container: String,

    /// List under the container that the instance is an entry of.
    #[arg(long)]
    pub list: String,

    /// Instance document (JSON, or YAML).
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum)]
    pub direction: DirectionArg,

    /// YAML or JSON mapping of dotted paths to `xmlns...=uri` entries.
    #[arg(long)]
    pub namespaces: Option<PathBuf>,

    /// Write the result to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the map subcommand.
pub fn run_map(args: &MapArgs) -> Result<u8> {
    let module = load_module(&args.schema)?;
    let target = WireTarget::resolve(&module, &args.container, &args.list)?;
    if let Some(namespace) = target.namespace {
        tracing::debug!(namespace, "resolved list entry");
    }

    let instance = read_instance(&args.input)?;
    let mapped = match args.direction {
        DirectionArg::ToInternal => {
            let namespaces = match &args.namespaces {
                Some(path) => read_namespaces(path)?,
                None => BTreeMap::new(),
            };
            target.to_wire(&instance, &namespaces)
        }
        DirectionArg::ToExternal => {
            if args.namespaces.is_some() {
                tracing::warn!("--namespaces only applies to to-internal; ignoring");
            }
            target.from_wire(&instance)
        }
    };

    let mut text = serde_json::to_string_pretty(&mapped)?;
    text.push('\n');
    emit(&text, args.output.as_deref())?;
    Ok(0)
}

/// Read a `path → attribute` namespace mapping.
pub fn read_namespaces(path: &Path) -> Result<BTreeMap<String, String>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("invalid namespace mapping in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MODULE: &str = "\
name: example
kind: container
namespace: urn:example
children:
  - name: interfaces
    kind: container
    children:
      - name: interface
        kind: list
        key: name
        children:
          - name: name
            kind: leaf
            type: { name: string }
          - name: admin-status
            kind: leaf
            type: { name: enumeration, enum: [up, down] }
";

    fn args(dir: &Path, input: serde_json::Value, direction: DirectionArg) -> MapArgs {
        let schema = dir.join("example.yaml");
        std::fs::write(&schema, MODULE).unwrap();
        let input_path = dir.join("input.json");
        std::fs::write(&input_path, input.to_string()).unwrap();
        MapArgs {
            schema,
            container: "interfaces".to_string(),
            list: "interface".to_string(),
            input: input_path,
            direction,
            namespaces: None,
            output: Some(dir.join("out.json")),
        }
    }

    fn output(args: &MapArgs) -> serde_json::Value {
        let text = std::fs::read_to_string(args.output.as_ref().unwrap()).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn maps_to_internal_with_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), json!({"name": "eth0", "adminStatus": "Down"}), DirectionArg::ToInternal);
        let ns = dir.path().join("ns.yaml");
        std::fs::write(&ns, "admin-status: xmlns:if=urn:if\n").unwrap();
        args.namespaces = Some(ns);

        assert_eq!(run_map(&args).unwrap(), 0);
        assert_eq!(
            output(&args),
            json!({"name": "eth0", "admin-status": {"-xmlns:if": "urn:if", "#text": "down"}})
        );
    }

    #[test]
    fn maps_to_external() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), json!({"name": "eth0", "admin-status": "up"}), DirectionArg::ToExternal);
        run_map(&args).unwrap();
        assert_eq!(output(&args), json!({"name": "eth0", "adminStatus": "Up"}));
    }

    #[test]
    fn unknown_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), json!({}), DirectionArg::ToExternal);
        args.list = "bundle".to_string();
        assert!(run_map(&args).is_err());
        assert!(!args.output.unwrap().exists());
    }
}
