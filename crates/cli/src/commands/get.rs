//! Get command implementation.
//!
//! Responsibilities:
//! - Resolve one path and print its value, optionally converted.
//!
//! Invariants / Assumptions:
//! - Strings print raw (no quotes) so output can be used in shell scripts.
//! - Mappings and sequences print as pretty JSON.

use anyhow::Result;
use cascade_config::Config;
use serde_json::Value;

use crate::args::ValueType;

/// Run the get command.
pub fn run(config: &Config, path: &str, as_type: Option<ValueType>) -> Result<()> {
    println!("{}", render(config, path, as_type)?);
    Ok(())
}

fn render(config: &Config, path: &str, as_type: Option<ValueType>) -> Result<String> {
    let rendered = match as_type {
        None => render_raw(config.get(path)?)?,
        Some(ValueType::Json) => serde_json::to_string_pretty(config.get(path)?)?,
        Some(ValueType::String) => config.get_string(path)?,
        Some(ValueType::Bool) => config.get_bool(path)?.to_string(),
        Some(ValueType::Int) => config.get_int64(path)?.to_string(),
        Some(ValueType::Uint) => config.get_uint64(path)?.to_string(),
        Some(ValueType::Float) => config.get_float64(path)?.to_string(),
        Some(ValueType::Time) => config.get_time(path)?.to_rfc3339(),
        Some(ValueType::Duration) => {
            humantime::format_duration(config.get_duration(path)?).to_string()
        }
    };
    Ok(rendered)
}

fn render_raw(value: &Value) -> Result<String> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => serde_json::to_string_pretty(value)?,
        scalar => scalar.to_string(),
    })
}
