//! Environment variable helpers for building the loader.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Load an optional `.env` file into the process environment.
//!
//! Does NOT handle:
//! - Override-file lookups, which must see the raw value (see `overrides`).
//! - Applying values to a loader (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - Dotenv errors never carry `.env` line contents.

use super::error::ConfigError;
use crate::constants::DOTENV_DISABLED_VAR;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from a `.env` file in the working directory.
///
/// Returns `Ok(true)` when a file was loaded and `Ok(false)` when it was
/// missing or loading is disabled via `DOTENV_DISABLED`. Variables already
/// present in the environment are not replaced.
///
/// # Errors
///
/// - `ConfigError::DotenvParse` when the file has invalid syntax.
/// - `ConfigError::DotenvIo` when the file exists but cannot be read.
pub fn load_dotenv() -> Result<bool, ConfigError> {
    if dotenv_disabled() {
        return Ok(false);
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env file");
            Ok(true)
        }
        Err(e) if is_not_found(&e) => Ok(false),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
