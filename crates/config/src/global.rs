//! Optional process-wide configuration.
//!
//! Responsibilities:
//! - Install one `Config` for the whole process and hand out `'static` references.
//!
//! Does NOT handle:
//! - Reloading; the installed config is immutable. Code that needs reload owns
//!   its `Config` and passes it explicitly.
//!
//! Invariants:
//! - `init` succeeds at most once; later calls return `AlreadyInitialized`
//!   and leave the installed config untouched.
//! - A failed `init` installs nothing, so a later `init` may still succeed.

use std::sync::OnceLock;

use crate::config::Config;
use crate::loader::{ConfigError, ConfigLoader};

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Load with `loader` and install the result as the process-wide config.
pub fn init(loader: &ConfigLoader) -> Result<(), ConfigError> {
    if GLOBAL.get().is_some() {
        return Err(ConfigError::AlreadyInitialized);
    }
    let config = loader.load()?;
    GLOBAL
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The process-wide config, if installed.
pub fn try_get() -> Result<&'static Config, ConfigError> {
    GLOBAL.get().ok_or(ConfigError::NotInitialized)
}

/// The process-wide config.
///
/// # Panics
///
/// Panics when [`init`] has not succeeded yet.
#[track_caller]
pub fn get() -> &'static Config {
    match try_get() {
        Ok(config) => config,
        Err(err) => panic!("{err}"),
    }
}
