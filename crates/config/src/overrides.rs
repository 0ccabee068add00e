//! Environment-variable overrides declared by the `env` override file.
//!
//! Responsibilities:
//! - Walk the override tree and collect one binding per leaf (config path → variable name).
//! - Validate that every leaf names a variable before anything is written.
//! - Overwrite the merged tree at each bound path whose variable is set.
//!
//! Does NOT handle:
//! - Locating or parsing the override file (see `loader`).
//! - Type coercion; overridden values are stored as raw strings and converted
//!   at read time by the typed accessors.
//!
//! Invariants:
//! - An unset variable leaves the file-derived value untouched.
//! - A variable set to the empty string still overrides.
//! - Override paths must address existing containers; missing parents fail with
//!   `PathNotFound` instead of being created.
//! - Any non-empty string leaf is a variable name, taken verbatim (no trimming).
//! - Variable values are never logged.

use std::env::VarError;

use serde::Serialize;
use serde_json::Value;

use crate::cast::kind_of;
use crate::loader::ConfigError;
use crate::path::{ConfigPath, Segment};

/// One leaf of the override tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideBinding {
    /// Where the value is written in the merged tree.
    #[serde(serialize_with = "serialize_display")]
    pub path: ConfigPath,
    /// Environment variable supplying the value.
    pub variable: String,
    /// Whether the variable was set when overrides were applied.
    pub applied: bool,
}

fn serialize_display<S: serde::Serializer>(path: &ConfigPath, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(path)
}

/// Collect every leaf of the override tree, validating that each names a variable.
pub fn collect_bindings(overrides: &Value) -> Result<Vec<OverrideBinding>, ConfigError> {
    let mut bindings = Vec::new();
    walk(overrides, ConfigPath::root(), &mut bindings)?;
    Ok(bindings)
}

fn walk(
    node: &Value,
    path: ConfigPath,
    out: &mut Vec<OverrideBinding>,
) -> Result<(), ConfigError> {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, path.child(Segment::Key(key.clone())), out)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, path.child(Segment::Index(index)), out)?;
            }
            Ok(())
        }
        Value::String(name) if !name.is_empty() => {
            out.push(OverrideBinding {
                path,
                variable: name.clone(),
                applied: false,
            });
            Ok(())
        }
        other => Err(ConfigError::InvalidOverride {
            path: path.to_string(),
            found: match other {
                Value::String(_) => "an empty string".to_string(),
                _ => kind_of(other).to_string(),
            },
        }),
    }
}

/// Apply overrides using the process environment.
pub fn apply_overrides(
    tree: &mut Value,
    overrides: &Value,
) -> Result<Vec<OverrideBinding>, ConfigError> {
    apply_overrides_with(tree, overrides, lookup_process_env)
}

/// Apply overrides using a custom variable lookup.
///
/// Returns the bindings with `applied` set for every variable that was found.
pub fn apply_overrides_with<F>(
    tree: &mut Value,
    overrides: &Value,
    lookup: F,
) -> Result<Vec<OverrideBinding>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut bindings = collect_bindings(overrides)?;
    for binding in &mut bindings {
        let Some(value) = lookup(&binding.variable) else {
            continue;
        };
        binding.path.set(tree, Value::String(value))?;
        binding.applied = true;
        tracing::debug!(
            variable = %binding.variable,
            path = %binding.path,
            "applied environment override"
        );
    }
    Ok(bindings)
}

/// Case-sensitive exact-name lookup; non-UTF-8 values are skipped.
fn lookup_process_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            tracing::warn!(variable = %name, "ignoring override: value is not valid UTF-8");
            None
        }
    }
}
