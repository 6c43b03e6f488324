//! Configuration schema.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::semver::SemVer;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectorConfig {
    /// Per-component settings keyed by component id.
    #[serde(default)]
    pub components: BTreeMap<String, ComponentConfig>,

    /// Dump-mode settings.
    #[serde(default)]
    pub dump: DumpConfig,
}

impl InspectorConfig {
    /// Settings for a component, if configured.
    pub fn component(&self, id: &str) -> Option<&ComponentConfig> {
        self.components.get(id)
    }

    /// Whether a component is enabled (default: yes).
    pub fn is_enabled(&self, id: &str) -> bool {
        self.component(id).map(|c| c.enabled).unwrap_or(true)
    }

    /// Configured expected version, falling back to `default`.
    pub fn expected_version(&self, id: &str, default: Option<&str>) -> Option<SemVer> {
        self.component(id)
            .and_then(|c| c.expected_version.as_deref())
            .or(default)
            .map(SemVer::parse)
    }
}

/// Settings for a single component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    /// Whether the component is registered at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Version the installed tool is measured against.
    #[serde(default)]
    pub expected_version: Option<String>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expected_version: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Dump-mode settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpConfig {
    /// Log files not modified within this many days are left out.
    #[serde(default = "default_log_max_age_days")]
    pub log_max_age_days: u64,

    /// Directory for generated archives when `--output` is not given.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Extra environment variable names to redact, matched exactly.
    #[serde(default)]
    pub redact_env: Vec<String>,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            log_max_age_days: default_log_max_age_days(),
            output_dir: None,
            redact_env: Vec::new(),
        }
    }
}

fn default_log_max_age_days() -> u64 {
    14
}
