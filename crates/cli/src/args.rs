//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate the global options into a `ConfigLoader`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use std::path::PathBuf;

use cascade_config::ConfigLoader;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cascade")]
#[command(about = "Inspect layered configuration directories", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  cascade --dir config get server.port --as uint\n  cascade --deployment-env APP_ENV dump --format yaml\n  cascade --deployment production --instance inst1 candidates\n  cascade --dir config sources\n"
)]
pub struct Cli {
    /// Directory holding the configuration files
    #[arg(short, long, global = true, env = "CASCADE_CONFIG_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Deployment tier (e.g., production)
    #[arg(long, global = true, conflicts_with = "deployment_env")]
    pub deployment: Option<String>,

    /// Read the deployment tier from this environment variable
    #[arg(long, global = true, value_name = "VAR")]
    pub deployment_env: Option<String>,

    /// Instance id within the deployment
    #[arg(long, global = true, conflicts_with = "instance_env")]
    pub instance: Option<String>,

    /// Read the instance id from this environment variable
    #[arg(long, global = true, value_name = "VAR")]
    pub instance_env: Option<String>,

    /// Full hostname (defaults to the machine hostname)
    #[arg(long, global = true, conflicts_with = "hostname_env")]
    pub hostname: Option<String>,

    /// Read the full hostname from this environment variable
    #[arg(long, global = true, value_name = "VAR")]
    pub hostname_env: Option<String>,

    /// Log loader activity (files merged, overrides applied) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at a path
    Get {
        /// Path expression (e.g., server.port, hosts[0].name)
        path: String,

        /// Convert the value before printing
        #[arg(long = "as", value_enum)]
        as_type: Option<ValueType>,
    },

    /// Print the merged tree
    Dump {
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Json)]
        format: DumpFormat,
    },

    /// Show the environment, merged files, and override bindings
    Sources {
        #[arg(short, long, value_enum, default_value_t = SourcesFormat::Table)]
        format: SourcesFormat,
    },

    /// List candidate basenames in merge order
    Candidates,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    String,
    Bool,
    Int,
    Uint,
    Float,
    Time,
    Duration,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpFormat {
    Json,
    Yaml,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourcesFormat {
    Table,
    Json,
}

impl Cli {
    /// Build the loader described by the global options.
    pub fn loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new(&self.dir);

        if let Some(ref var) = self.deployment_env {
            loader = loader.with_deployment_from_env(var);
        }
        if let Some(ref deployment) = self.deployment {
            loader = loader.with_deployment(deployment.clone());
        }

        if let Some(ref var) = self.instance_env {
            loader = loader.with_instance_from_env(var);
        }
        if let Some(ref instance) = self.instance {
            loader = loader.with_instance(instance.clone());
        }

        if let Some(ref var) = self.hostname_env {
            loader = loader.with_hostname_from_env(var);
        }
        // Blank values fall back to the machine hostname
        if let Some(ref hostname) = self.hostname {
            if !hostname.trim().is_empty() {
                loader = loader.with_hostname(hostname.clone());
            }
        }

        loader
    }
}
