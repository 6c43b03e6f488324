//! Run context shared by every pipeline stage.
//!
//! The context is created once per process, populated during setup
//! (registration) and then passed by shared reference through the executor.

use std::path::PathBuf;

use super::capability::{Capabilities, Platform};
use super::registry::Registry;
use crate::config::InspectorConfig;
use crate::ui::Logger;

/// Flags controlling a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFlags {
    /// Show debug output.
    pub debug: bool,
    /// Include experimental components.
    pub experimental: bool,
    /// Include interactive components and confirm remediation commands.
    pub interactive: bool,
    /// Never execute anything with side effects.
    pub dry_run: bool,
    /// Optional JSON config file.
    pub config_file: Option<PathBuf>,
    /// Optional log file receiving the full run log.
    pub log_file: Option<PathBuf>,
    /// Restrict the run to these component ids.
    pub only: Vec<String>,
    /// Leave out these component ids.
    pub skip: Vec<String>,
}

/// Why a component will not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    Platform(Platform),
    Experimental,
    Interactive,
    NotSelected,
    Disabled,
}

impl std::fmt::Display for Ineligible {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ineligible::Platform(p) => write!(f, "not supported on {}", p),
            Ineligible::Experimental => write!(f, "experimental (enable with --experimental)"),
            Ineligible::Interactive => write!(f, "interactive (enable with --interactive)"),
            Ineligible::NotSelected => write!(f, "not selected"),
            Ineligible::Disabled => write!(f, "disabled in config"),
        }
    }
}

/// Shared run state: flags, configuration, logger and registry.
pub struct Context {
    name: String,
    flags: RunFlags,
    config: InspectorConfig,
    logger: Box<dyn Logger>,
    registry: Registry,
    platform: Platform,
}

impl Context {
    /// Create a context with default flags and configuration.
    pub fn new(name: &str, logger: Box<dyn Logger>) -> Self {
        Self {
            name: name.to_string(),
            flags: RunFlags::default(),
            config: InspectorConfig::default(),
            logger,
            registry: Registry::new(),
            platform: Platform::current(),
        }
    }

    /// Replace the run flags.
    pub fn with_flags(mut self, flags: RunFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Pretend to run on another platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Context with a [`MockLogger`](crate::ui::MockLogger) (test-only).
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new("test", Box::new(crate::ui::MockLogger::new()))
    }

    /// Name of the running tool.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run flags.
    pub fn flags(&self) -> &RunFlags {
        &self.flags
    }

    /// Loaded configuration.
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// The logger.
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// The component registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable registry access for the setup phase.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Platform the run targets.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Decide whether a component takes part in this run.
    pub fn eligibility(&self, id: &str, caps: &Capabilities) -> Result<(), Ineligible> {
        if !self.flags.only.is_empty() && !self.flags.only.iter().any(|o| o == id) {
            return Err(Ineligible::NotSelected);
        }
        if self.flags.skip.iter().any(|s| s == id) {
            return Err(Ineligible::NotSelected);
        }
        if !self.config.is_enabled(id) {
            return Err(Ineligible::Disabled);
        }
        if !caps.supports(self.platform) {
            return Err(Ineligible::Platform(self.platform));
        }
        if caps.experimental && !self.flags.experimental {
            return Err(Ineligible::Experimental);
        }
        if caps.interactive && !self.flags.interactive {
            return Err(Ineligible::Interactive);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("platform", &self.platform)
            .field("registry", &self.registry)
            .finish()
    }
}
