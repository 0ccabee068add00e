//! Shared test utilities for cascade integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//!
//! Invariants / Assumptions:
//! - Commands run inside the given directory with a fixed hostname.
//! - Host variables that feed clap defaults are cleared.

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a hermetic `cascade` command running in `dir`.
pub fn cascade_cmd(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cascade");
    cmd.current_dir(dir.path());

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("CASCADE_CONFIG_DIR").env_remove("RUST_LOG");

    cmd.args(["--hostname", "service1.example.com"]);
    cmd
}

/// Write `content` to `dir/name`.
pub fn write(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}
