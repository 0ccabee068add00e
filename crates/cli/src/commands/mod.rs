//! CLI command implementations.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//! - Load the configuration for commands that need the merged tree.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code selection (see `error` module).

pub mod candidates;
pub mod dump;
pub mod get;
pub mod sources;

use anyhow::Result;
use cascade_config::Config;

use crate::args::{Cli, Commands};
use crate::error::LoadError;

/// Dispatch the parsed command to its handler.
pub fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Get { path, as_type } => get::run(&load(cli)?, path, *as_type),
        Commands::Dump { format } => dump::run(&load(cli)?, *format),
        Commands::Sources { format } => sources::run(&load(cli)?, *format),
        Commands::Candidates => candidates::run(cli),
    }
}

fn load(cli: &Cli) -> Result<Config> {
    let config = cli.loader().load().map_err(LoadError)?;
    Ok(config)
}
