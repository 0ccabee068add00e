//! Environment descriptor used to instantiate the file template ladder.
//!
//! Responsibilities:
//! - Hold the deployment tier, instance id, and short/full hostnames.
//! - Derive the short hostname from the full hostname.
//! - Resolve the running machine's hostname when none is configured.
//!
//! Does NOT handle:
//! - Reading environment variables (see `loader::env`).
//! - Expanding templates (see `templates`).
//!
//! Invariants:
//! - The descriptor is immutable once built.
//! - `short_hostname` is always the prefix of `full_hostname` up to the first `.`.

use serde::Serialize;

use crate::constants::{DEFAULT_DEPLOYMENT, DEFAULT_INSTANCE};
use crate::loader::ConfigError;

/// The deployment context a configuration directory is resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    deployment: String,
    instance: String,
    short_hostname: String,
    full_hostname: String,
}

impl Environment {
    /// Create a descriptor from explicit values.
    pub fn new(
        deployment: impl Into<String>,
        instance: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        let full_hostname = hostname.into();
        Self {
            deployment: deployment.into(),
            instance: instance.into(),
            short_hostname: short_hostname(&full_hostname).to_string(),
            full_hostname,
        }
    }

    /// Create a descriptor with default deployment and instance for the running machine.
    pub fn detect() -> Result<Self, ConfigError> {
        Ok(Self::new(
            DEFAULT_DEPLOYMENT,
            DEFAULT_INSTANCE,
            machine_hostname()?,
        ))
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn short_hostname(&self) -> &str {
        &self.short_hostname
    }

    pub fn full_hostname(&self) -> &str {
        &self.full_hostname
    }
}

/// Truncate a hostname at the first `.`.
pub fn short_hostname(full: &str) -> &str {
    full.split('.').next().unwrap_or(full)
}

/// The running machine's hostname.
pub(crate) fn machine_hostname() -> Result<String, ConfigError> {
    let name = hostname::get().map_err(ConfigError::Hostname)?;
    Ok(name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hostname_truncates_at_first_dot() {
        assert_eq!(short_hostname("service1.example.com"), "service1");
        assert_eq!(short_hostname("service1"), "service1");
        assert_eq!(short_hostname(""), "");
        assert_eq!(short_hostname(".hidden"), "");
    }

    #[test]
    fn test_new_derives_short_hostname() {
        let env = Environment::new("production", "inst1", "service1.example.com");
        assert_eq!(env.deployment(), "production");
        assert_eq!(env.instance(), "inst1");
        assert_eq!(env.short_hostname(), "service1");
        assert_eq!(env.full_hostname(), "service1.example.com");
    }

    #[test]
    fn test_detect_uses_defaults() {
        let env = Environment::detect().unwrap();
        assert_eq!(env.deployment(), DEFAULT_DEPLOYMENT);
        assert_eq!(env.instance(), "");
        assert!(env.full_hostname().starts_with(env.short_hostname()));
    }
}
