//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` describing the config directory,
//!   the environment descriptor, and the format parsers.
//! - Run initialization: scan the directory, merge candidate files in ladder
//!   order, then apply the `env` override file.
//!
//! Does NOT handle:
//! - Answering queries (see `config.rs`).
//! - Process-wide installation (see `global.rs`).
//!
//! Invariants / Assumptions:
//! - `*_from_env` options read their variable when the option is applied.
//! - Files are processed strictly in template order; later files win.
//! - Initialization is all-or-nothing: on any error no `Config` is produced.
//! - The machine hostname is only looked up when no hostname was configured.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::env::env_var_or_none;
use super::error::ConfigError;
use super::scan::DirIndex;
use crate::config::Config;
use crate::constants::{DEFAULT_DEPLOYMENT, DEFAULT_INSTANCE, OVERRIDE_BASENAME};
use crate::environment::{Environment, machine_hostname};
use crate::format::{FormatParser, ParserRegistry};
use crate::merge::merge;
use crate::overrides::{OverrideBinding, apply_overrides};
use crate::templates::candidates;

/// A file that contributed to the merged tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Ladder template the file matched.
    pub template: &'static str,
    /// Expanded basename (no extension).
    pub basename: String,
    pub path: PathBuf,
    /// Name of the parser used.
    pub format: String,
}

/// Everything a successful initialization produces.
pub(crate) struct LoadedTree {
    pub tree: Value,
    pub sources: Vec<SourceFile>,
    pub overrides: Vec<OverrideBinding>,
}

/// Builds a [`Config`] from a directory of layered files.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dir: PathBuf,
    deployment: String,
    instance: String,
    hostname: Option<String>,
    parsers: ParserRegistry,
}

impl ConfigLoader {
    /// Create a loader for `dir` with default deployment, no instance, and the
    /// machine hostname.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            instance: DEFAULT_INSTANCE.to_string(),
            hostname: None,
            parsers: ParserRegistry::builtin(),
        }
    }

    /// Set the deployment tier.
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    /// Read the deployment tier from `var`, falling back to the default when unset.
    pub fn with_deployment_from_env(self, var: &str) -> Self {
        let deployment = env_var_or_none(var).unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string());
        self.with_deployment(deployment)
    }

    /// Set the instance id.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    /// Read the instance id from `var`, falling back to no instance when unset.
    pub fn with_instance_from_env(self, var: &str) -> Self {
        let instance = env_var_or_none(var).unwrap_or_else(|| DEFAULT_INSTANCE.to_string());
        self.with_instance(instance)
    }

    /// Set the full hostname; the short hostname is derived from it.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Read the full hostname from `var`; unset keeps the current hostname setting.
    pub fn with_hostname_from_env(self, var: &str) -> Self {
        match env_var_or_none(var) {
            Some(hostname) => self.with_hostname(hostname),
            None => self,
        }
    }

    /// Register a parser for an extension, or replace the built-in one.
    pub fn with_parser(mut self, extension: &str, parser: Arc<dyn FormatParser>) -> Self {
        self.parsers.register(extension, parser);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve the environment descriptor, looking up the machine hostname if needed.
    pub fn environment(&self) -> Result<Environment, ConfigError> {
        let hostname = match &self.hostname {
            Some(hostname) => hostname.clone(),
            None => machine_hostname()?,
        };
        Ok(Environment::new(
            self.deployment.clone(),
            self.instance.clone(),
            hostname,
        ))
    }

    /// Initialize: build the merged configuration from scratch.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let environment = self.environment()?;
        let loaded = self.load_tree(&environment)?;
        Ok(Config::from_parts(self.clone(), environment, loaded))
    }

    pub(crate) fn load_tree(&self, environment: &Environment) -> Result<LoadedTree, ConfigError> {
        let index = DirIndex::scan(&self.dir, &self.parsers)?;
        tracing::debug!(
            dir = %self.dir.display(),
            files = index.len(),
            deployment = environment.deployment(),
            instance = environment.instance(),
            hostname = environment.full_hostname(),
            "scanned config directory"
        );

        let mut tree = Value::Object(Map::new());
        let mut sources = Vec::new();
        for candidate in candidates(environment) {
            if candidate.basename.is_empty() {
                continue;
            }
            let Some(entry) = index.get(&candidate.basename) else {
                continue;
            };
            merge(&mut tree, entry.load()?);
            tracing::debug!(file = %entry.path.display(), template = candidate.template, "merged config file");
            sources.push(SourceFile {
                template: candidate.template,
                basename: candidate.basename,
                path: entry.path.clone(),
                format: entry.parser.name().to_string(),
            });
        }

        let overrides = match index.get(OVERRIDE_BASENAME) {
            Some(entry) => apply_overrides(&mut tree, &entry.load()?)?,
            None => Vec::new(),
        };

        tracing::info!(
            dir = %self.dir.display(),
            sources = sources.len(),
            overrides_applied = overrides.iter().filter(|b| b.applied).count(),
            "configuration initialized"
        );

        Ok(LoadedTree {
            tree,
            sources,
            overrides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let loader = ConfigLoader::new("/etc/app").with_hostname("box.example.com");
        let env = loader.environment().unwrap();
        assert_eq!(env.deployment(), "development");
        assert_eq!(env.instance(), "");
        assert_eq!(env.short_hostname(), "box");
        assert_eq!(loader.dir(), Path::new("/etc/app"));
    }

    #[test]
    fn test_machine_hostname_when_unset() {
        let env = ConfigLoader::new(".").environment().unwrap();
        assert_eq!(
            env.short_hostname(),
            crate::environment::short_hostname(env.full_hostname())
        );
    }

    #[test]
    #[serial]
    fn test_from_env_options() {
        temp_env::with_vars(
            [
                ("_CASCADE_DEP", Some("production")),
                ("_CASCADE_INST", Some("inst1")),
                ("_CASCADE_HOST", Some("service1.example.com")),
            ],
            || {
                let env = ConfigLoader::new(".")
                    .with_deployment_from_env("_CASCADE_DEP")
                    .with_instance_from_env("_CASCADE_INST")
                    .with_hostname_from_env("_CASCADE_HOST")
                    .environment()
                    .unwrap();
                assert_eq!(env.deployment(), "production");
                assert_eq!(env.instance(), "inst1");
                assert_eq!(env.short_hostname(), "service1");
                assert_eq!(env.full_hostname(), "service1.example.com");
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_options_fall_back_when_unset() {
        temp_env::with_vars(
            [
                ("_CASCADE_DEP", None::<&str>),
                ("_CASCADE_INST", None),
                ("_CASCADE_HOST", Some("  ")),
            ],
            || {
                let env = ConfigLoader::new(".")
                    .with_deployment("staging")
                    .with_instance("inst9")
                    .with_hostname("fixed.example.com")
                    .with_deployment_from_env("_CASCADE_DEP")
                    .with_instance_from_env("_CASCADE_INST")
                    .with_hostname_from_env("_CASCADE_HOST")
                    .environment()
                    .unwrap();
                assert_eq!(env.deployment(), "development");
                assert_eq!(env.instance(), "");
                assert_eq!(env.full_hostname(), "fixed.example.com");
            },
        );
    }
}
