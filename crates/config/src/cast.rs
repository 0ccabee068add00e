//! Conservative conversions from tree values to Rust types.
//!
//! Responsibilities:
//! - Convert a resolved [`Value`] into strings, booleans, integers, floats,
//!   times, durations, slices, and string-keyed maps.
//!
//! Does NOT handle:
//! - Path resolution (see `path`).
//! - Attaching the queried path to errors (done by `Config`, which maps [`CastError`]).
//!
//! Invariants:
//! - Numeric-to-numeric conversion only succeeds without loss (no truncation,
//!   no wrap-around); strings are parsed explicitly.
//! - Booleans come from booleans or an explicit boolean literal string; numbers
//!   never coerce to booleans.
//! - Env overrides store raw strings, so every scalar accessor accepts a string
//!   representation of its type.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// A value could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastError {
    pub expected: &'static str,
    pub message: String,
}

impl CastError {
    fn new(expected: &'static str, message: impl Into<String>) -> Self {
        Self {
            expected,
            message: message.into(),
        }
    }

    fn found(expected: &'static str, value: &Value) -> Self {
        Self::new(expected, format!("found {}", kind_of(value)))
    }
}

/// Human-readable kind of a value, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

pub fn to_string(value: &Value) -> Result<String, CastError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CastError::found("string", other)),
    }
}

pub fn to_bool(value: &Value) -> Result<bool, CastError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => parse_bool(s.trim())
            .ok_or_else(|| CastError::new("bool", format!("'{s}' is not a boolean literal"))),
        other => Err(CastError::found("bool", other)),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Integer view of a value, wide enough for every `i64` and `u64`.
fn to_i128(value: &Value, expected: &'static str) -> Result<i128, CastError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(i128::from(u))
            } else {
                n.as_f64()
                    .and_then(integral_f64)
                    .ok_or_else(|| CastError::new(expected, format!("{n} is not a whole number")))
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i128>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_f64))
                .ok_or_else(|| CastError::new(expected, format!("'{s}' is not an integer")))
        }
        other => Err(CastError::found(expected, other)),
    }
}

fn integral_f64(f: f64) -> Option<i128> {
    // i128 covers every integer an f64 can represent below 2^127
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1.7e38 {
        Some(f as i128)
    } else {
        None
    }
}

macro_rules! integer_cast {
    ($($name:ident => $ty:ty, $label:literal;)*) => {
        $(
            pub fn $name(value: &Value) -> Result<$ty, CastError> {
                let wide = to_i128(value, $label)?;
                <$ty>::try_from(wide).map_err(|_| {
                    CastError::new($label, format!("{wide} is out of range"))
                })
            }
        )*
    };
}

integer_cast! {
    to_isize => isize, "int";
    to_i32 => i32, "int32";
    to_i64 => i64, "int64";
    to_usize => usize, "uint";
    to_u32 => u32, "uint32";
    to_u64 => u64, "uint64";
}

pub fn to_f64(value: &Value) -> Result<f64, CastError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CastError::new("float64", format!("{n} is not representable"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CastError::new("float64", format!("'{s}' is not a number"))),
        other => Err(CastError::found("float64", other)),
    }
}

/// Unix epoch seconds (integer or fractional) or a timestamp string, in UTC.
pub fn to_time(value: &Value) -> Result<DateTime<Utc>, CastError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(epoch_seconds)
            .ok_or_else(|| CastError::new("time", format!("{n} is not a valid epoch"))),
        Value::String(s) => parse_time(s.trim())
            .ok_or_else(|| CastError::new("time", format!("'{s}' is not a recognized timestamp"))),
        other => Err(CastError::found("time", other)),
    }
}

fn epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as u32;
    Utc.timestamp_opt(whole as i64, nanos.min(999_999_999)).single()
}

fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }
    s.parse::<f64>().ok().and_then(epoch_seconds)
}

/// Humantime expressions (`10h`, `1h 30m`, `250ms`); bare numbers are seconds.
pub fn to_duration(value: &Value) -> Result<Duration, CastError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(seconds)
            .ok_or_else(|| CastError::new("duration", format!("{n} is not a valid duration"))),
        Value::String(s) => {
            let trimmed = s.trim();
            humantime::parse_duration(trimmed)
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(seconds))
                .ok_or_else(|| CastError::new("duration", format!("'{s}' is not a duration")))
        }
        other => Err(CastError::found("duration", other)),
    }
}

fn seconds(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

pub fn to_int_slice(value: &Value) -> Result<Vec<i64>, CastError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                to_i64(item).map_err(|e| CastError::new("int slice", format!("[{i}]: {}", e.message)))
            })
            .collect(),
        other => Err(CastError::found("int slice", other)),
    }
}

/// A sequence of scalars, or a whitespace-separated string.
pub fn to_string_slice(value: &Value) -> Result<Vec<String>, CastError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                to_string(item)
                    .map_err(|e| CastError::new("string slice", format!("[{i}]: {}", e.message)))
            })
            .collect(),
        Value::String(s) => Ok(s.split_whitespace().map(str::to_string).collect()),
        other => Err(CastError::found("string slice", other)),
    }
}

pub fn to_string_map(value: &Value) -> Result<Map<String, Value>, CastError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        other => Err(CastError::found("string map", other)),
    }
}
