//! Built-in components.
//!
//! Each submodule provides the collector, validator and (optionally)
//! reactor for one tool. [`register_builtins`] wires them into a registry
//! with their capabilities and configured expectations.

pub mod bazel;
pub mod brew;
pub mod command;
pub mod python;

use regex::Regex;
use std::sync::LazyLock;

use crate::api::Registry;
use crate::config::InspectorConfig;
use crate::semver::SemVer;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+){0,2}").unwrap());

/// Pull the first version-looking token out of tool output.
///
/// `"Python 3.11.4"` → `3.11.4`, `"bazel 6.4.0-homebrew"` → `6.4.0`.
pub fn extract_version(output: &str) -> Option<SemVer> {
    VERSION_REGEX
        .find(output)
        .map(|m| SemVer::parse(m.as_str()))
}

/// Register every built-in component not disabled in `config`.
///
/// Registration order is execution order: brew, python, bazel.
/// `bazel-brew` is registered with `bazel` and can be disabled on its own.
pub fn register_builtins(registry: &mut Registry, config: &InspectorConfig) {
    if config.is_enabled(brew::ID) {
        brew::register(registry, config);
    }
    if config.is_enabled(python::ID) {
        python::register(registry, config);
    }
    if config.is_enabled(bazel::ID) {
        bazel::register(registry, config);
    }
}
