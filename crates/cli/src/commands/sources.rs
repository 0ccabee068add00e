//! Sources command implementation.
//!
//! Responsibilities:
//! - Show the environment descriptor, merged files in order, and override bindings.
//!
//! Does NOT handle:
//! - Printing override values; env values may be secrets.

use anyhow::Result;
use cascade_config::{Config, Environment, OverrideBinding, SourceFile};
use serde::Serialize;

use crate::args::SourcesFormat;

#[derive(Serialize)]
struct SourcesOutput<'a> {
    environment: &'a Environment,
    sources: &'a [SourceFile],
    overrides: &'a [OverrideBinding],
}

/// Run the sources command.
pub fn run(config: &Config, format: SourcesFormat) -> Result<()> {
    let output = SourcesOutput {
        environment: config.environment(),
        sources: config.sources(),
        overrides: config.overrides(),
    };
    match format {
        SourcesFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        SourcesFormat::Table => print!("{}", format_table(&output)),
    }
    Ok(())
}

fn format_table(output: &SourcesOutput<'_>) -> String {
    let env = output.environment;
    let mut out = String::new();
    out.push_str("Environment:\n");
    out.push_str(&format!("  deployment:     {}\n", env.deployment()));
    out.push_str(&format!("  instance:       {}\n", env.instance()));
    out.push_str(&format!("  short hostname: {}\n", env.short_hostname()));
    out.push_str(&format!("  full hostname:  {}\n", env.full_hostname()));

    out.push_str("\nSources (merge order):\n");
    if output.sources.is_empty() {
        out.push_str("  (none)\n");
    }
    for (i, source) in output.sources.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<40} {:<6} {}\n",
            i + 1,
            source.template,
            source.format,
            source.path.display()
        ));
    }

    out.push_str("\nOverrides:\n");
    if output.overrides.is_empty() {
        out.push_str("  (none)\n");
    }
    for binding in output.overrides {
        let status = if binding.applied { "applied" } else { "unset" };
        out.push_str(&format!(
            "  {:<30} <- {:<30} {}\n",
            binding.path.to_string(),
            binding.variable,
            status
        ));
    }
    out
}
