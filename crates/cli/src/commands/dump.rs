//! Dump command implementation.
//!
//! Responsibilities:
//! - Print the whole merged tree as JSON or YAML.

use anyhow::Result;
use cascade_config::Config;

use crate::args::DumpFormat;

/// Run the dump command.
pub fn run(config: &Config, format: DumpFormat) -> Result<()> {
    let output = match format {
        DumpFormat::Json => serde_json::to_string_pretty(config.tree())?,
        DumpFormat::Yaml => serde_yaml::to_string(config.tree())?,
    };
    println!("{}", output.trim_end());
    Ok(())
}
