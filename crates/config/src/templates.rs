//! Template ladder that decides which files are merged and in what order.
//!
//! Responsibilities:
//! - Define the fixed, ordered list of filename templates.
//! - Expand each template against an [`Environment`] into one basename.
//!
//! Does NOT handle:
//! - Directory listing or extension selection (see `loader::scan`).
//! - The override file, whose basename is fixed (see `constants::OVERRIDE_BASENAME`).
//!
//! Invariants:
//! - Order runs from most general (`default`) to most specific, with the `local`
//!   tier last; later entries override earlier ones when merged.
//! - Every template expands to exactly one basename; no globbing.
//! - Templates are expanded verbatim, so an empty instance still yields `default-`.
//! - A template that expands to the override basename (`env`) is dropped from
//!   the ladder, so the override file is never merged as ordinary config.

use crate::constants::OVERRIDE_BASENAME;
use crate::environment::Environment;

/// Filename templates in merge order.
pub const TEMPLATES: [&str; 16] = [
    "default",
    "default-{instance}",
    "{deployment}",
    "{deployment}-{instance}",
    "{shortHostname}",
    "{shortHostname}-{instance}",
    "{shortHostname}-{deployment}",
    "{shortHostname}-{deployment}-{instance}",
    "{fullHostname}",
    "{fullHostname}-{instance}",
    "{fullHostname}-{deployment}",
    "{fullHostname}-{deployment}-{instance}",
    "local",
    "local-{instance}",
    "local-{deployment}",
    "local-{deployment}-{instance}",
];

/// A template paired with its expansion for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub template: &'static str,
    pub basename: String,
}

/// Substitute the environment's fields into a single template.
pub fn expand(template: &str, env: &Environment) -> String {
    template
        .replace("{deployment}", env.deployment())
        .replace("{instance}", env.instance())
        .replace("{shortHostname}", env.short_hostname())
        .replace("{fullHostname}", env.full_hostname())
}

/// Expand the whole ladder, in merge order, minus the override basename.
pub fn candidates(env: &Environment) -> Vec<Candidate> {
    TEMPLATES
        .iter()
        .map(|&template| Candidate {
            template,
            basename: expand(template, env),
        })
        .filter(|candidate| candidate.basename != OVERRIDE_BASENAME)
        .collect()
}

/// Expanded basenames only, in merge order.
pub fn candidate_basenames(env: &Environment) -> Vec<String> {
    candidates(env).into_iter().map(|c| c.basename).collect()
}
