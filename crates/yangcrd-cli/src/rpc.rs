//! # Rpc Subcommand
//!
//! Emits the rpc fragment of a module: one boolean trigger plus input and
//! output objects per remote procedure.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use yangcrd_schema::compile_rpcs;

use crate::{emit, load_module};

/// Arguments for the rpc subcommand.
#[derive(Args, Debug)]
pub struct RpcArgs {
    /// Schema tree document.
    #[arg(long)]
    pub schema: PathBuf,

    /// Write the fragment to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Execute the rpc subcommand.
pub fn run_rpc(args: &RpcArgs) -> Result<u8> {
    let module = load_module(&args.schema)?;
    let Some(fragment) = compile_rpcs(&module) else {
        anyhow::bail!("no rpc entries found in module '{}'", module.name);
    };
    emit(&fragment.to_yaml()?, args.output.as_deref())?;
    Ok(0)
}
