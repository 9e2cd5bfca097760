//! # yangcrd CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yangcrd_cli::compile::{run_compile, CompileArgs};
use yangcrd_cli::describe::{run_describe, DescribeArgs};
use yangcrd_cli::discover::{run_discover, DiscoverArgs};
use yangcrd_cli::map::{run_map, MapArgs};
use yangcrd_cli::rpc::{run_rpc, RpcArgs};
use yangcrd_cli::validate::{run_validate, ValidateArgs};

/// yangcrd — schema tree to resource definition compiler.
///
/// Compiles spec and status fragments from a device schema tree, derives
/// resource descriptors, and maps instance data between device and resource
/// form.
#[derive(Parser, Debug)]
#[command(name = "yangcrd", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML options file (root, instance, name, group, key, config).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile the spec or status fragment of a root/instance.
    Compile(CompileArgs),

    /// Compile the rpc fragment of a module.
    Rpc(RpcArgs),

    /// Print the resource descriptor of a root/instance.
    Describe(DescribeArgs),

    /// List the root/instance candidates of a module.
    Discover(DiscoverArgs),

    /// Map an instance between canonical and external form.
    Map(MapArgs),

    /// Validate an external instance against the compiled fragment.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Compile(args) => run_compile(args, config),
        Commands::Rpc(args) => run_rpc(args),
        Commands::Describe(args) => run_describe(args, config),
        Commands::Discover(args) => run_discover(args),
        Commands::Map(args) => run_map(args),
        Commands::Validate(args) => run_validate(args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
