//! Path expressions for addressing values inside a configuration tree.
//!
//! Responsibilities:
//! - Parse dotted/bracketed expressions (`a.b.c`, `a[0].b`, `a["x.y"]`) into segments.
//! - Resolve a path against a tree, read-only.
//! - Overwrite the value at a path whose parent already exists.
//!
//! Does NOT handle:
//! - Type conversion of the resolved value (see `cast`).
//! - Creating intermediate containers; a missing parent is an error.
//!
//! Invariants:
//! - A key segment that parses as an unsigned integer also indexes sequences.
//! - An index segment also looks up its decimal form in mappings.
//! - `Display` renders a canonical form that parses back to the same segments.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::loader::ConfigError;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) => k.parse().ok(),
        }
    }

    fn as_key(&self) -> String {
        match self {
            Segment::Key(k) => k.clone(),
            Segment::Index(i) => i.to_string(),
        }
    }
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ConfigPath {
    segments: Vec<Segment>,
}

impl ConfigPath {
    /// The path addressing the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        parse_segments(input)
            .map(Self::from_segments)
            .map_err(|message| ConfigError::InvalidPath {
                path: input.to_string(),
                message,
            })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path with one more segment.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Look up the value at this path.
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<&'a Value, ConfigError> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| child(node, segment))
            .ok_or_else(|| ConfigError::path_not_found(self.to_string()))
    }

    /// Overwrite the value at this path.
    ///
    /// Every intermediate container must exist. The last segment may create a
    /// new mapping key, but a sequence index must already be in range.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<(), ConfigError> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Err(ConfigError::path_not_found(self.to_string()));
        };

        let mut node = root;
        for segment in parents {
            node = match child_mut(node, segment) {
                Some(next) => next,
                None => return Err(ConfigError::path_not_found(self.to_string())),
            };
        }

        match node {
            Value::Object(map) => {
                map.insert(last.as_key(), value);
                Ok(())
            }
            Value::Array(items) => match last.as_index().and_then(|i| items.get_mut(i)) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(ConfigError::path_not_found(self.to_string())),
            },
            _ => Err(ConfigError::path_not_found(self.to_string())),
        }
    }
}

fn child<'a>(node: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(&segment.as_key()),
        Value::Array(items) => segment.as_index().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(&segment.as_key()),
        Value::Array(items) => segment.as_index().and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

impl FromStr for ConfigPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Index(idx) => write!(f, "[{idx}]")?,
                Segment::Key(key) if needs_quoting(key) => {
                    write!(f, "[\"{}\"]", key.replace('\\', "\\\\").replace('"', "\\\""))?
                }
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key.starts_with('$')
        || key
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '.' | '[' | ']' | '"' | '\''))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    AfterDot,
    AfterSegment,
}

fn parse_segments(input: &str) -> Result<Vec<Segment>, String> {
    let mut rest = input.trim();
    if rest == "$" {
        return Ok(Vec::new());
    }
    if let Some(stripped) = rest.strip_prefix("$.") {
        if stripped.is_empty() {
            return Err("trailing '.'".to_string());
        }
        rest = stripped;
    } else if rest.starts_with("$[") {
        rest = &rest[1..];
    }

    let chars: Vec<char> = rest.chars().collect();
    let mut segments = Vec::new();
    let mut state = State::Start;
    let mut pos = 0;

    while pos < chars.len() {
        match (state, chars[pos]) {
            (_, '[') if state != State::AfterDot => {
                let (segment, next) = parse_bracket(&chars, pos)?;
                segments.push(segment);
                pos = next;
                state = State::AfterSegment;
            }
            (State::AfterSegment, '.') => {
                pos += 1;
                state = State::AfterDot;
            }
            (State::AfterSegment, c) => {
                return Err(format!("unexpected '{c}' at position {pos}"));
            }
            (_, '.' | '[' | ']') => {
                return Err(format!("empty key at position {pos}"));
            }
            _ => {
                let start = pos;
                while pos < chars.len() && !matches!(chars[pos], '.' | '[' | ']') {
                    pos += 1;
                }
                segments.push(Segment::Key(chars[start..pos].iter().collect()));
                state = State::AfterSegment;
            }
        }
    }

    if state == State::AfterDot {
        return Err("trailing '.'".to_string());
    }
    Ok(segments)
}

/// Parse `[N]`, `["key"]` or `['key']` starting at `open`; returns the position after `]`.
fn parse_bracket(chars: &[char], open: usize) -> Result<(Segment, usize), String> {
    let mut pos = open + 1;
    match chars.get(pos) {
        Some(&quote) if quote == '"' || quote == '\'' => {
            pos += 1;
            let mut key = String::new();
            loop {
                match chars.get(pos) {
                    None => return Err(format!("unterminated quoted key at position {open}")),
                    Some('\\') => {
                        let escaped = chars
                            .get(pos + 1)
                            .ok_or_else(|| format!("unterminated quoted key at position {open}"))?;
                        key.push(*escaped);
                        pos += 2;
                    }
                    Some(&c) if c == quote => {
                        pos += 1;
                        break;
                    }
                    Some(&c) => {
                        key.push(c);
                        pos += 1;
                    }
                }
            }
            if chars.get(pos) != Some(&']') {
                return Err(format!("expected ']' at position {pos}"));
            }
            Ok((Segment::Key(key), pos + 1))
        }
        _ => {
            let close = chars[pos..]
                .iter()
                .position(|&c| c == ']')
                .map(|offset| pos + offset)
                .ok_or_else(|| format!("unterminated '[' at position {open}"))?;
            let inner: String = chars[pos..close].iter().collect();
            let index = inner
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid index '{inner}' at position {open}"))?;
            Ok((Segment::Index(index), close + 1))
        }
    }
}
