//! # yangcrd-cli — Command-Line Tool for yangcrd
//!
//! Provides the `yangcrd` binary. Each subcommand lives in its own module
//! with a clap `Args` struct and a `run_*` handler returning the process exit
//! code.
//!
//! ## Subcommands
//!
//! - `yangcrd compile` — spec or status fragment for a root/instance.
//! - `yangcrd rpc` — the rpc fragment of a module.
//! - `yangcrd describe` — resource kind, plural, short names and key field.
//! - `yangcrd discover` — root/instance candidates of a module.
//! - `yangcrd map` — instance data between canonical and external form.
//! - `yangcrd validate` — check an external instance against the spec fragment.
//!
//! ```bash
//! yangcrd compile --schema example.yaml --root interfaces --instance interface
//! yangcrd compile --schema example.yaml --options root=system --status -o status.yaml
//! yangcrd map --schema example.yaml --container interfaces --list interface \
//!     --input eth0.json --direction to-internal --namespaces ns.yaml
//! ```
//!
//! Output files are written only once their content is complete, so a
//! failing run never leaves a partial artifact behind.

pub mod compile;
pub mod describe;
pub mod discover;
pub mod map;
pub mod rpc;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use yangcrd_core::{CrdOptions, SchemaNode};

/// Schema and root/instance selection shared by the compiling subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Schema tree document (YAML, or JSON with a `.json` extension).
    #[arg(long)]
    pub schema: PathBuf,

    /// Top-level node to start from.
    #[arg(long)]
    pub root: Option<String>,

    /// Container or list under the root that one resource maps to.
    #[arg(long)]
    pub instance: Option<String>,

    /// Explicit resource name.
    #[arg(long)]
    pub name: Option<String>,

    /// Key field override for lists with several keys.
    #[arg(long)]
    pub key: Option<String>,

    /// Resource group.
    #[arg(long)]
    pub group: Option<String>,

    /// Compile read-only status instead of writable spec.
    #[arg(long)]
    pub status: bool,

    /// Inline options, e.g. `root=interfaces,instance=interface,config=false`.
    #[arg(long)]
    pub options: Option<String>,
}

impl SelectionArgs {
    /// Layer defaults, the config file, inline options and flags, in that order.
    pub fn resolve_options(&self, config: Option<&Path>) -> Result<CrdOptions> {
        let mut options = match config {
            Some(path) => CrdOptions::load(path)
                .with_context(|| format!("failed to load config file: {}", path.display()))?,
            None => CrdOptions::default(),
        };
        if let Some(inline) = &self.options {
            options.apply_inline(inline);
        }
        let flags = [
            (&self.root, &mut options.root),
            (&self.instance, &mut options.instance),
            (&self.name, &mut options.name),
            (&self.key, &mut options.key),
            (&self.group, &mut options.group),
        ];
        for (flag, field) in flags {
            if let Some(value) = flag {
                field.clone_from(value);
            }
        }
        if self.status {
            options.config = false;
        }
        tracing::debug!(?options, "resolved options");
        Ok(options)
    }

    pub fn load_module(&self) -> Result<SchemaNode> {
        load_module(&self.schema)
    }
}

/// Load a schema tree document.
pub fn load_module(path: &Path) -> Result<SchemaNode> {
    SchemaNode::load(path).with_context(|| format!("failed to load schema tree: {}", path.display()))
}

/// Read an instance document: JSON for `.json` files, YAML otherwise.
pub fn read_instance(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        _ => serde_yaml::from_str(&content).with_context(|| format!("invalid YAML in {}", path.display()))?,
    };
    Ok(value)
}

/// Print `content` to stdout, or write it to `output` when given.
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => print!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> SelectionArgs {
        SelectionArgs {
            schema: PathBuf::from("schema.yaml"),
            ..SelectionArgs::default()
        }
    }

    #[test]
    fn flags_override_inline_options() {
        let args = SelectionArgs {
            root: Some("system".to_string()),
            options: Some("root=interfaces,instance=interface".to_string()),
            ..selection()
        };
        let opts = args.resolve_options(None).unwrap();
        assert_eq!(opts.root, "system");
        assert_eq!(opts.instance, "interface");
        assert!(opts.config);
    }

    #[test]
    fn status_flag_selects_status_mode() {
        let args = SelectionArgs {
            status: true,
            ..selection()
        };
        assert!(args.resolve_options(None).unwrap().is_status());
    }

    #[test]
    fn config_file_is_the_base_layer() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("yangcrd.yaml");
        std::fs::write(&config, "root: interfaces\ngroup: example.com\nname: Port\n").unwrap();

        let args = SelectionArgs {
            options: Some("name=Link".to_string()),
            ..selection()
        };
        let opts = args.resolve_options(Some(&config)).unwrap();
        assert_eq!(opts.root, "interfaces");
        assert_eq!(opts.group, "example.com");
        assert_eq!(opts.name, "Link");
    }

    #[test]
    fn bad_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bad.yaml");
        std::fs::write(&config, "unknown: 1\n").unwrap();
        assert!(selection().resolve_options(Some(&config)).is_err());
    }

    #[test]
    fn read_instance_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("a.json");
        let yaml_path = dir.path().join("a.yaml");
        std::fs::write(&json_path, r#"{"name": "eth0"}"#).unwrap();
        std::fs::write(&yaml_path, "name: eth0\n").unwrap();
        assert_eq!(read_instance(&json_path).unwrap(), read_instance(&yaml_path).unwrap());
    }

    #[test]
    fn emit_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out.yaml");
        emit("spec: {}\n", Some(&out)).unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "spec: {}\n");
    }
}
