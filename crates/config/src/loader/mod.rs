//! Configuration loader for layered config directories.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` describing where and how to load.
//! - Scan the config directory and pick one file per candidate basename.
//! - Load an optional `.env` file and read loader options from environment variables.
//!
//! Does NOT handle:
//! - Query-time conversions (see `config.rs` and `cast.rs`).
//! - The merge and override algorithms themselves (see `merge.rs`, `overrides.rs`).
//!
//! Invariants / Assumptions:
//! - More specific candidates override less specific ones; the `env` file is applied last.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod scan;

pub use builder::{ConfigLoader, SourceFile};
pub(crate) use builder::LoadedTree;
pub use env::{env_var_or_none, load_dotenv};
pub use error::ConfigError;

#[cfg(test)]
mod tests;
