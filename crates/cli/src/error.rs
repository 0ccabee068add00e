//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Any failure while building the configuration exits with `LoadFailed`,
//!   whatever the underlying error kind.
//! - Query failures are only classified as such after a successful load.

use cascade_config::ConfigError;
use thiserror::Error;

/// Structured exit codes for cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Load failure - directory, file, parse, or override error.
    ///
    /// Scripts should fix the configuration directory and retry.
    LoadFailed = 2,

    /// Path not found - the queried key does not exist.
    NotFound = 3,

    /// Validation error - malformed path or value of the wrong type.
    ValidationError = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Wraps an error raised while building the configuration.
#[derive(Debug, Error)]
#[error("Failed to load configuration: {0}")]
pub struct LoadError(#[source] pub ConfigError);

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::PathNotFound { .. } => ExitCode::NotFound,
            ConfigError::InvalidPath { .. } | ConfigError::TypeMismatch { .. } => {
                ExitCode::ValidationError
            }
            ConfigError::DirectoryRead { .. }
            | ConfigError::FileRead { .. }
            | ConfigError::Parse { .. }
            | ConfigError::InvalidOverride { .. }
            | ConfigError::Hostname(_) => ExitCode::LoadFailed,
            ConfigError::AlreadyInitialized
            | ConfigError::NotInitialized
            | ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no config error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if cause.downcast_ref::<LoadError>().is_some() {
                return ExitCode::LoadFailed;
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }
        ExitCode::GeneralError
    }
}
