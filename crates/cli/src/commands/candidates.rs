//! Candidates command implementation.
//!
//! Responsibilities:
//! - Print the expanded template ladder for the configured environment.
//!
//! Does NOT handle:
//! - Checking which candidates exist on disk (see `sources`).

use anyhow::Result;
use cascade_config::candidate_basenames;

use crate::args::Cli;
use crate::error::LoadError;

/// Run the candidates command.
pub fn run(cli: &Cli) -> Result<()> {
    let environment = cli.loader().environment().map_err(LoadError)?;
    for basename in candidate_basenames(&environment) {
        println!("{basename}");
    }
    Ok(())
}
