//! Bazel build tool.
//!
//! The installed `bazel` is often a symlink to `bazelisk` or a Homebrew
//! cellar path; both the link and its target are recorded.

use std::path::PathBuf;

use super::command::CommandCollector;
use crate::api::{
    validate_version, Capabilities, Collector, Context, Data, Reactor, ReactorCommand, Registry,
    Status, ValidationResult, Validator,
};
use crate::config::InspectorConfig;
use crate::error::{InspectorError, Result};
use crate::semver::SemVer;

pub const ID: &str = "bazel";

/// Component id of the experimental Homebrew remediation for bazel.
pub const BREW_ID: &str = "bazel-brew";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BazelInfo {
    /// Path found on `PATH`.
    pub path: PathBuf,
    /// `path` with symlinks resolved.
    pub real_path: PathBuf,
    pub version: SemVer,
}

#[derive(Debug, Default)]
pub struct BazelInfoCollector;

impl Collector for BazelInfoCollector {
    fn collect(&self, ctx: &Context) -> Result<Option<Data>> {
        let Some(info) = CommandCollector::new("bazel").probe()? else {
            ctx.logger().warn("'bazel' not installed");
            return Ok(None);
        };

        let version = info.version.ok_or_else(|| {
            InspectorError::collection(ID, format!("no version in output: {:?}", info.raw))
        })?;
        let real_path = std::fs::canonicalize(&info.path).unwrap_or_else(|_| info.path.clone());

        Ok(Some(Box::new(BazelInfo {
            path: info.path,
            real_path,
            version,
        })))
    }
}

#[derive(Debug, Clone)]
pub struct BazelInfoValidator {
    expected: Option<SemVer>,
}

impl BazelInfoValidator {
    pub fn new(expected: Option<SemVer>) -> Self {
        Self { expected }
    }
}

impl Validator for BazelInfoValidator {
    fn validate(&self, data: Option<Data>, _ctx: &Context) -> Result<ValidationResult> {
        validate_version::<BazelInfo, _>(ID, data, self.expected.as_ref(), |info| {
            Some(info.version)
        })
    }
}

/// Reports the validation outcome and asks for nothing.
#[derive(Debug, Default)]
pub struct BazelValidationLogReactor;

impl Reactor for BazelValidationLogReactor {
    fn react(&self, result: &ValidationResult, ctx: &Context) -> Result<Vec<ReactorCommand>> {
        let logger = ctx.logger();
        match (result.status(), result.data_as::<BazelInfo>()) {
            (Status::Ok, Some(info)) => logger.debug(&format!(
                "bazel {} at {} ({})",
                info.version,
                info.path.display(),
                info.real_path.display()
            )),
            (Status::NotFound, _) => logger.info("bazel is not installed"),
            (Status::UpgradeRequired, Some(info)) => {
                logger.info(&format!("bazel {} is too old", info.version))
            }
            (Status::DowngradeRequired, Some(info)) => {
                logger.info(&format!("bazel {} is too new", info.version))
            }
            (status, _) => logger.debug(&format!("bazel validation: {}", status)),
        }
        Ok(Vec::new())
    }
}

/// Installs or upgrades a Homebrew formula depending on the status.
#[derive(Debug, Clone)]
pub struct BrewFormulaReactor {
    formula: String,
}

impl BrewFormulaReactor {
    pub fn new(formula: &str) -> Self {
        Self {
            formula: formula.to_string(),
        }
    }
}

impl Reactor for BrewFormulaReactor {
    fn react(&self, result: &ValidationResult, _ctx: &Context) -> Result<Vec<ReactorCommand>> {
        let command = match result.status() {
            Status::NotFound => ReactorCommand::new(["brew", "install", self.formula.as_str()])
                .with_description(format!("install {}", self.formula)),
            Status::UpgradeRequired => {
                ReactorCommand::new(["brew", "upgrade", self.formula.as_str()])
                    .with_description(format!("upgrade {}", self.formula))
            }
            _ => return Ok(Vec::new()),
        };
        Ok(vec![command])
    }
}

/// Registers `bazel` with the log reactor and, as a separate experimental
/// macOS-only component, the Homebrew remediation.
pub fn register(registry: &mut Registry, config: &InspectorConfig) {
    let expected = config.expected_version(ID, None);

    registry.register_collector(ID, BazelInfoCollector);
    registry.register_validator(ID, BazelInfoValidator::new(expected));
    registry.register_reactor(ID, BazelValidationLogReactor);

    if config.is_enabled(BREW_ID) {
        registry.register_collector(BREW_ID, BazelInfoCollector);
        registry.register_validator(BREW_ID, BazelInfoValidator::new(expected));
        registry.register_reactor(BREW_ID, BrewFormulaReactor::new("bazel"));
        registry.set_capabilities(BREW_ID, Capabilities::macos().experimental());
    }
}
