//! Format parsers that turn raw file bytes into configuration trees.
//!
//! Responsibilities:
//! - Define the [`FormatParser`] trait used for every file format.
//! - Provide built-in YAML, JSON, JSON5, HJSON, and TOML parsers.
//! - Map file extensions to parsers in a fixed priority order ([`ParserRegistry`]).
//!
//! Does NOT handle:
//! - Reading files from disk (see `loader::scan`).
//! - Attaching file paths to errors (the loader wraps [`FormatError`]).
//!
//! Invariants:
//! - Every parsed document root is a mapping; an empty document is an empty mapping.
//! - Extension lookup is case-insensitive.
//! - Registry order is the tie-break when several files share a basename.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::constants::BUILTIN_EXTENSIONS;

/// A parser rejected its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError(pub String);

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FormatError {}

impl FormatError {
    fn new(err: impl fmt::Display) -> Self {
        FormatError(err.to_string())
    }
}

/// Parses raw bytes of one file format into a configuration tree.
pub trait FormatParser: Send + Sync {
    /// Short format name used in logs and error messages.
    fn name(&self) -> &str;

    /// Parse a document. The returned value must be a mapping.
    fn parse(&self, input: &[u8]) -> Result<Value, FormatError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl FormatParser for YamlParser {
    fn name(&self) -> &str {
        "yaml"
    }

    fn parse(&self, input: &[u8]) -> Result<Value, FormatError> {
        let text = utf8(input)?;
        // a stream of only comments holds no document at all
        if text
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'))
        {
            return Ok(Value::Object(Map::new()));
        }
        let value: Value = serde_yaml::from_str(text).map_err(FormatError::new)?;
        into_root_mapping(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl FormatParser for JsonParser {
    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, input: &[u8]) -> Result<Value, FormatError> {
        let value: Value = serde_json::from_slice(input).map_err(FormatError::new)?;
        into_root_mapping(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Json5Parser;

impl FormatParser for Json5Parser {
    fn name(&self) -> &str {
        "json5"
    }

    fn parse(&self, input: &[u8]) -> Result<Value, FormatError> {
        let value: Value = json5::from_str(utf8(input)?).map_err(FormatError::new)?;
        into_root_mapping(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HjsonParser;

impl FormatParser for HjsonParser {
    fn name(&self) -> &str {
        "hjson"
    }

    fn parse(&self, input: &[u8]) -> Result<Value, FormatError> {
        let text = utf8(input)?;
        if text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        let value: Value = deser_hjson::from_str(text).map_err(FormatError::new)?;
        into_root_mapping(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlParser;

impl FormatParser for TomlParser {
    fn name(&self) -> &str {
        "toml"
    }

    fn parse(&self, input: &[u8]) -> Result<Value, FormatError> {
        let table: toml::Table = toml::from_str(utf8(input)?).map_err(FormatError::new)?;
        Ok(Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_value(v)))
                .collect(),
        ))
    }
}

/// TOML datetimes become RFC 3339 strings; everything else maps one to one.
fn toml_to_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_value(v)))
                .collect(),
        ),
    }
}

fn utf8(input: &[u8]) -> Result<&str, FormatError> {
    std::str::from_utf8(input).map_err(|e| FormatError(format!("input is not valid UTF-8: {e}")))
}

fn into_root_mapping(value: Value) -> Result<Value, FormatError> {
    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(Map::new())),
        other => Err(FormatError(format!(
            "document root must be a mapping, found {}",
            crate::cast::kind_of(&other)
        ))),
    }
}

/// Extension-to-parser table with a stable priority order.
#[derive(Clone)]
pub struct ParserRegistry {
    entries: Vec<(String, Arc<dyn FormatParser>)>,
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(ext, p)| (ext, p.name())))
            .finish()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ParserRegistry {
    /// A registry with no parsers.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in parsers, in [`BUILTIN_EXTENSIONS`] order.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for ext in BUILTIN_EXTENSIONS {
            let parser: Arc<dyn FormatParser> = match ext {
                "yaml" | "yml" => Arc::new(YamlParser),
                "json" => Arc::new(JsonParser),
                "json5" => Arc::new(Json5Parser),
                "hjson" => Arc::new(HjsonParser),
                _ => Arc::new(TomlParser),
            };
            registry.register(ext, parser);
        }
        registry
    }

    /// Register a parser for an extension (without the leading dot).
    ///
    /// A known extension keeps its priority slot and swaps its parser; a new
    /// extension is appended with the lowest priority.
    pub fn register(&mut self, extension: &str, parser: Arc<dyn FormatParser>) {
        let ext = normalize_extension(extension);
        if let Some(slot) = self.entries.iter_mut().find(|(e, _)| *e == ext) {
            slot.1 = parser;
        } else {
            self.entries.push((ext, parser));
        }
    }

    /// Look up the parser for an extension.
    pub fn get(&self, extension: &str) -> Option<&Arc<dyn FormatParser>> {
        let ext = normalize_extension(extension);
        self.entries.iter().find(|(e, _)| *e == ext).map(|(_, p)| p)
    }

    /// Priority rank of an extension; lower wins.
    pub fn priority(&self, extension: &str) -> Option<usize> {
        let ext = normalize_extension(extension);
        self.entries.iter().position(|(e, _)| *e == ext)
    }

    /// Registered extensions in priority order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(e, _)| e.as_str())
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
