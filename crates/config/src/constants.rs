//! Centralized constants for the cascade configuration loader.
//!
//! This module contains the fixed names and defaults shared by the
//! template resolver, the directory scanner, and the CLI.

// =============================================================================
// Environment Descriptor Defaults
// =============================================================================

/// Deployment tier used when none is configured.
pub const DEFAULT_DEPLOYMENT: &str = "development";

/// Instance id used when none is configured.
pub const DEFAULT_INSTANCE: &str = "";

// =============================================================================
// File Resolution
// =============================================================================

/// Reserved basename of the environment-variable override file.
pub const OVERRIDE_BASENAME: &str = "env";

/// Extensions understood out of the box, in selection priority order.
///
/// When a directory holds several files with the same basename, the file whose
/// extension appears first here is loaded and the others are ignored.
pub const BUILTIN_EXTENSIONS: [&str; 6] = ["yaml", "yml", "json", "json5", "hjson", "toml"];

// =============================================================================
// Dotenv
// =============================================================================

/// Variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
