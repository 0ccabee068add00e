//! Tests for loading layered config directories.
//!
//! Responsibilities:
//! - Test merging of candidate files and provenance reporting.
//! - Test the full template ladder against a realistic environment.
//! - Test override file handling and `.env` loading.
//! - Test reload semantics.
//!
//! Does NOT handle:
//! - Path grammar and conversion rules (tested in path.rs and cast.rs).
//! - Directory scanning details (tested in scan.rs).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable and cwd pollution.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::Path;

use crate::loader::builder::ConfigLoader;

pub mod basic_tests;

/// Write `content` to `dir/name`.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Loader for `dir` with a fixed hostname so tests never depend on the machine.
pub fn loader_for(dir: &Path) -> ConfigLoader {
    ConfigLoader::new(dir).with_hostname("service1.example.com")
}
