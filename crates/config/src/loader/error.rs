//! Error types for configuration loading and querying.
//!
//! Responsibilities:
//! - Define error variants for every initialization failure (directory listing,
//!   file reads, parsing, override validation, override path navigation).
//! - Define error variants for read-path failures (missing path, malformed path,
//!   type mismatch) which are local to a single query.
//!
//! Does NOT handle:
//! - Deciding whether an error is fatal (callers pick `get_*` vs `must_get_*`).
//! - Process exit codes (see `crates/cli`).
//!
//! Invariants:
//! - All error variants include context for debugging (paths, variable names, kinds).
//! - Parse errors always name the offending file.
//! - Errors never include environment variable values or raw `.env` content.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or querying a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config file {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// An override file leaf did not name an environment variable.
    #[error("Invalid override at '{path}': expected an environment variable name, found {found}")]
    InvalidOverride { path: String, found: String },

    #[error("Configuration path not found: '{path}'")]
    PathNotFound { path: String },

    #[error("Invalid configuration path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("Cannot read '{path}' as {expected}: {message}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        message: String,
    },

    #[error("Unable to determine hostname: {0}")]
    Hostname(#[source] std::io::Error),

    #[error("Global configuration is already initialized")]
    AlreadyInitialized,

    #[error("Global configuration has not been initialized")]
    NotInitialized,

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// Returns true for errors raised by a query against an initialized tree.
    ///
    /// Query errors leave the configuration valid; every other kind means the
    /// initialization that produced it published nothing.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            ConfigError::PathNotFound { .. }
                | ConfigError::InvalidPath { .. }
                | ConfigError::TypeMismatch { .. }
        )
    }

    pub(crate) fn path_not_found(path: impl Into<String>) -> Self {
        ConfigError::PathNotFound { path: path.into() }
    }
}
