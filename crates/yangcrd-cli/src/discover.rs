//! # Discover Subcommand
//!
//! Lists the root/instance pairings a module offers, and the one that would
//! be chosen when neither is given.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use yangcrd_core::{candidates, discover_instance, Candidate, CandidateShape};

use crate::load_module;

/// Arguments for the discover subcommand.
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Schema tree document.
    #[arg(long)]
    pub schema: PathBuf,

    /// Print candidates as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the discover subcommand.
pub fn run_discover(args: &DiscoverArgs) -> Result<u8> {
    let module = load_module(&args.schema)?;
    let found = candidates(&module);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        for candidate in &found {
            println!("{}", format_candidate(candidate));
        }
    }

    match discover_instance(&module) {
        Ok(selection) => tracing::info!(root = %selection.root, instance = %selection.instance, "default selection"),
        Err(e) => tracing::info!("no default selection: {e}"),
    }
    Ok(0)
}

/// One line per candidate: `<shape> root <root> instance <a,b>`.
pub fn format_candidate(candidate: &Candidate) -> String {
    let shape = match candidate.shape {
        CandidateShape::List => "list",
        CandidateShape::SingleContainer => "single-container",
        CandidateShape::Container => "container",
    };
    format!(
        "{shape} root {} instance {}",
        candidate.root,
        candidate.instances.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_lines() {
        let c = Candidate {
            shape: CandidateShape::Container,
            root: "interfaces".to_string(),
            instances: vec!["interface".to_string(), "bundle".to_string()],
        };
        assert_eq!(format_candidate(&c), "container root interfaces instance interface,bundle");

        let single = Candidate {
            shape: CandidateShape::SingleContainer,
            root: "clock".to_string(),
            instances: vec!["clock".to_string()],
        };
        assert_eq!(format_candidate(&single), "single-container root clock instance clock");
    }
}
