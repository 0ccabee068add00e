//! Hierarchical configuration for services deployed across tiers, instances, and hosts.
//!
//! A config directory holds files named after a fixed ladder of templates
//! (`default`, `{deployment}`, `{shortHostname}-{instance}`, ..., `local`).
//! [`ConfigLoader::load`] merges the files that exist, in ladder order, into one
//! tree, then applies environment-variable overrides declared by the `env` file.
//! The resulting [`Config`] answers path queries with typed conversions.
//!
//! ```no_run
//! use cascade_config::{ConfigLoader, load_dotenv};
//!
//! # fn main() -> Result<(), cascade_config::ConfigError> {
//! load_dotenv()?;
//! let config = ConfigLoader::new("config")
//!     .with_deployment_from_env("APP_ENV")
//!     .load()?;
//! let port = config.get_uint32("server.port")?;
//! # let _ = port;
//! # Ok(())
//! # }
//! ```

pub mod cast;
mod config;
pub mod constants;
mod environment;
pub mod format;
pub mod global;
mod loader;
pub mod merge;
pub mod overrides;
pub mod path;
pub mod templates;

pub use config::Config;
pub use environment::{Environment, short_hostname};
pub use format::{FormatError, FormatParser, ParserRegistry};
pub use loader::{ConfigError, ConfigLoader, SourceFile, env_var_or_none, load_dotenv};
pub use overrides::OverrideBinding;
pub use path::{ConfigPath, Segment};
pub use templates::{TEMPLATES, candidate_basenames};
