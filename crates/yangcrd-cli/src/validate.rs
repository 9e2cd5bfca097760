//! # Validate Subcommand
//!
//! Compiles the selected fragment and checks an external-form instance
//! against it. Violations are printed one per line; the exit code is 1 when
//! any are found.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use yangcrd_core::select_instance;
use yangcrd_schema::{compile, resource_kind, FragmentValidationError, FragmentValidator, Mode};

use crate::{read_instance, SelectionArgs};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// External-form instance document (JSON, or YAML).
    #[arg(long)]
    pub input: PathBuf,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: Option<&Path>) -> Result<u8> {
    let module = args.selection.load_module()?;
    let options = args.selection.resolve_options(config)?;
    let selection = select_instance(&module, &options.root, &options.instance)?;
    let fragment = compile(selection.node, Mode::from_config(options.config))
        .with_context(|| format!("failed to compile {}", args.selection.schema.display()))?;

    let name = resource_kind(&selection.root, &selection.instance, &options.name);
    let validator = FragmentValidator::new(name, &fragment)?;
    let instance = read_instance(&args.input)?;

    match validator.validate(&instance) {
        Ok(()) => {
            println!("OK: {} conforms to {}", args.input.display(), validator.schema_name());
            Ok(0)
        }
        Err(FragmentValidationError::ValidationFailed { schema_name, violations }) => {
            println!(
                "FAIL: {} has {} violation(s) against {schema_name}",
                args.input.display(),
                violations.len()
            );
            println!("{violations}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = "\
name: example
kind: container
children:
  - name: ports
    kind: container
    children:
      - name: port
        kind: list
        key: id
        children:
          - name: id
            kind: leaf
            type: { name: uint8, range: \"1..48\" }
          - name: label
            kind: leaf
            type: { name: string }
";

    fn args(dir: &Path, instance: &str) -> ValidateArgs {
        let schema = dir.join("example.yaml");
        std::fs::write(&schema, MODULE).unwrap();
        let input = dir.join("port.yaml");
        std::fs::write(&input, instance).unwrap();
        ValidateArgs {
            selection: SelectionArgs {
                schema,
                root: Some("ports".to_string()),
                instance: Some("port".to_string()),
                ..SelectionArgs::default()
            },
            input,
        }
    }

    #[test]
    fn conforming_instance_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run_validate(&args(dir.path(), "id: 3\nlabel: uplink\n"), None).unwrap(), 0);
    }

    #[test]
    fn violations_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run_validate(&args(dir.path(), "id: 99\n"), None).unwrap(), 1);
        assert_eq!(run_validate(&args(dir.path(), "label: x\n"), None).unwrap(), 1);
    }
}
