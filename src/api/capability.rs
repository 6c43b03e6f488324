//! Typed capability metadata attached to each registered component.
//!
//! A component may be restricted to certain platforms, be experimental
//! (opt-in via `--experimental`) or interactive (only run with
//! `--interactive`). The executor consults these before running a component.

use std::collections::BTreeSet;
use std::fmt;

/// Operating system family a component can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
    Undefined,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Undefined
        }
    }

    /// Lowercase name used in logs and flag listings.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Eligibility metadata for a component.
///
/// An empty `platforms` set means the component runs everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub platforms: BTreeSet<Platform>,
    pub experimental: bool,
    pub interactive: bool,
}

impl Capabilities {
    /// No restrictions.
    pub fn any_platform() -> Self {
        Self::default()
    }

    /// Restricted to macOS.
    pub fn macos() -> Self {
        Self::default().on(Platform::MacOS)
    }

    /// Restricted to Linux.
    pub fn linux() -> Self {
        Self::default().on(Platform::Linux)
    }

    /// Add a supported platform.
    pub fn on(mut self, platform: Platform) -> Self {
        self.platforms.insert(platform);
        self
    }

    /// Mark as experimental.
    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }

    /// Mark as interactive.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Whether the component may run on `platform`.
    pub fn supports(&self, platform: Platform) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&platform)
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags: Vec<&str> = Vec::new();
        if self.experimental {
            flags.push("experimental");
        }
        if self.interactive {
            flags.push("interactive");
        }
        flags.extend(self.platforms.iter().map(|p| p.name()));
        f.write_str(&flags.join(", "))
    }
}
