//! Directory scanning and candidate file selection.
//!
//! Responsibilities:
//! - List the config directory once and index files by basename (extension stripped).
//! - Pick one file per basename using the parser registry's extension priority.
//! - Read and parse a selected file, attaching its path to any error.
//!
//! Does NOT handle:
//! - Deciding merge order (see `templates`).
//! - Merging or override application (see `merge`, `overrides`).
//!
//! Invariants:
//! - Subdirectories and files with unregistered extensions are ignored.
//! - When several files share a basename, the highest-priority extension wins;
//!   equal priorities (`default.yml` and `default.YML`) go to the smaller file name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use super::error::ConfigError;
use crate::format::{FormatParser, ParserRegistry};

/// A file selected for a basename.
#[derive(Clone)]
pub(crate) struct DirEntry {
    pub path: PathBuf,
    pub parser: Arc<dyn FormatParser>,
    priority: usize,
}

/// Files in a config directory, indexed by basename.
pub(crate) struct DirIndex {
    entries: HashMap<String, DirEntry>,
}

impl DirIndex {
    /// List `dir` and select one file per basename.
    pub fn scan(dir: &Path, registry: &ParserRegistry) -> Result<Self, ConfigError> {
        let read_err = |source| ConfigError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries: HashMap<String, DirEntry> = HashMap::new();
        for item in std::fs::read_dir(dir).map_err(read_err)? {
            let item = item.map_err(read_err)?;
            let path = item.path();
            // follows symlinks, so a linked file counts as a file
            if !path.is_file() {
                continue;
            }
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            let (Some(parser), Some(priority)) = (registry.get(ext), registry.priority(ext)) else {
                tracing::debug!(file = %path.display(), "skipping file with unsupported extension");
                continue;
            };

            let candidate = DirEntry {
                path: path.clone(),
                parser: Arc::clone(parser),
                priority,
            };
            match entries.get(stem) {
                Some(existing) if existing.rank() <= candidate.rank() => {
                    warn_shadowed(&existing.path, &path);
                }
                Some(existing) => {
                    warn_shadowed(&path, &existing.path);
                    entries.insert(stem.to_string(), candidate);
                }
                None => {
                    entries.insert(stem.to_string(), candidate);
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, basename: &str) -> Option<&DirEntry> {
        self.entries.get(basename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn warn_shadowed(kept: &Path, ignored: &Path) {
    tracing::warn!(
        kept = %kept.display(),
        ignored = %ignored.display(),
        "multiple config files share a basename; ignoring lower-priority extension"
    );
}

impl DirEntry {
    /// Ordering key among files sharing a basename; lower wins.
    fn rank(&self) -> (usize, Option<&std::ffi::OsStr>) {
        (self.priority, self.path.file_name())
    }

    /// Read and parse this file into a tree.
    pub fn load(&self) -> Result<Value, ConfigError> {
        let bytes = std::fs::read(&self.path).map_err(|source| ConfigError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        self.parser
            .parse(&bytes)
            .map_err(|err| ConfigError::Parse {
                path: self.path.clone(),
                format: self.parser.name().to_string(),
                message: err.to_string(),
            })
    }
}
