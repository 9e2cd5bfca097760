//! # Compile Subcommand
//!
//! Compiles the selected root/instance into a spec fragment, or a status
//! fragment with `--status` / `config=false`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use yangcrd_schema::compile_module;

use crate::{emit, SelectionArgs};

/// Arguments for the compile subcommand.
#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Write the fragment to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Emit the fragment as a JSON Schema document instead of YAML.
    #[arg(long)]
    pub json: bool,
}

/// Execute the compile subcommand.
pub fn run_compile(args: &CompileArgs, config: Option<&Path>) -> Result<u8> {
    let module = args.selection.load_module()?;
    let options = args.selection.resolve_options(config)?;

    let fragment = compile_module(&module, &options)
        .with_context(|| format!("failed to compile {}", args.selection.schema.display()))?;

    let rendered = if args.json {
        let mut text = serde_json::to_string_pretty(&fragment.to_json_schema()?)?;
        text.push('\n');
        text
    } else {
        fragment.to_yaml()?
    };
    emit(&rendered, args.output.as_deref())?;
    Ok(0)
}
