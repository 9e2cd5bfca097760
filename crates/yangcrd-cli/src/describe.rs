//! # Describe Subcommand
//!
//! Prints the resource descriptor for a selection: group, kind, plural,
//! short names and key field.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use yangcrd_schema::describe;

use crate::SelectionArgs;

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs, config: Option<&Path>) -> Result<u8> {
    let module = args.selection.load_module()?;
    let options = args.selection.resolve_options(config)?;
    let descriptor = describe(&module, &options)
        .with_context(|| format!("failed to describe {}", args.selection.schema.display()))?;
    print!("{}", serde_yaml::to_string(&descriptor)?);
    Ok(0)
}
