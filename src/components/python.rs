//! Python interpreter.
//!
//! Python 2 prints `--version` to stderr, Python 3 to stdout; the probe reads
//! both.

use std::path::PathBuf;

use super::command::CommandCollector;
use crate::api::{
    validate_version, Collector, Context, Data, Registry, ValidationResult, Validator,
};
use crate::config::InspectorConfig;
use crate::error::Result;
use crate::semver::SemVer;

pub const ID: &str = "python";

/// Expected version when the config sets none.
pub const DEFAULT_EXPECTED_VERSION: &str = "3.0.0";

const CANDIDATES: &[&str] = &["python3", "python"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInfo {
    pub path: PathBuf,
    pub version: SemVer,
}

/// Finds the first working interpreter in candidate order.
///
/// A candidate whose probe fails is skipped; the collector fails only when
/// no candidate produced a version and at least one probe failed.
#[derive(Debug, Clone)]
pub struct PythonInfoCollector {
    candidates: Vec<String>,
}

impl Default for PythonInfoCollector {
    fn default() -> Self {
        Self::with_candidates(CANDIDATES.iter().copied())
    }
}

impl PythonInfoCollector {
    /// Executables tried in order: names looked up on `PATH`, or paths.
    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl Collector for PythonInfoCollector {
    fn collect(&self, ctx: &Context) -> Result<Option<Data>> {
        let mut last_error = None;

        for candidate in &self.candidates {
            let info = match CommandCollector::new(candidate).probe() {
                Ok(Some(info)) => info,
                Ok(None) => {
                    ctx.logger()
                        .debug(&format!("'{}' not found on PATH", candidate));
                    continue;
                }
                Err(e) => {
                    ctx.logger()
                        .warn(&format!("'{}' is unusable: {}", candidate, e));
                    last_error = Some(e);
                    continue;
                }
            };

            let version = info.version.unwrap_or_default();
            ctx.logger().debug(&format!(
                "Found Python {} at {}",
                version,
                info.path.display()
            ));
            return Ok(Some(Box::new(PythonInfo {
                path: info.path,
                version,
            })));
        }

        if let Some(e) = last_error {
            return Err(e);
        }
        ctx.logger().warn("Python not installed");
        Ok(None)
    }
}

#[derive(Debug, Clone)]
pub struct PythonInfoValidator {
    expected: SemVer,
}

impl PythonInfoValidator {
    pub fn new(expected: SemVer) -> Self {
        Self { expected }
    }
}

impl Validator for PythonInfoValidator {
    fn validate(&self, data: Option<Data>, _ctx: &Context) -> Result<ValidationResult> {
        validate_version::<PythonInfo, _>(ID, data, Some(&self.expected), |info| {
            Some(info.version)
        })
    }
}

pub fn register(registry: &mut Registry, config: &InspectorConfig) {
    let expected = config
        .expected_version(ID, Some(DEFAULT_EXPECTED_VERSION))
        .unwrap_or_default();
    registry.register_collector(ID, PythonInfoCollector::default());
    registry.register_validator(ID, PythonInfoValidator::new(expected));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Status;
    use crate::ui::MockLogger;

    fn python_info_with(major: &str, minor: &str, patch: &str) -> Option<Data> {
        Some(Box::new(PythonInfo {
            path: PathBuf::from("/"),
            version: SemVer::from_parts(major, minor, patch),
        }))
    }

    fn validator() -> PythonInfoValidator {
        PythonInfoValidator::new(SemVer::new(2, 0, 0))
    }

    #[test]
    fn matching_version_is_ok() {
        let ctx = Context::for_tests();
        let result = validator()
            .validate(python_info_with("2", "0", "0"), &ctx)
            .unwrap();
        assert_eq!(result.status(), Status::Ok);
        assert_eq!(
            result.data_as::<PythonInfo>().unwrap().path,
            PathBuf::from("/")
        );
    }

    #[test]
    fn missing_python_is_not_found() {
        let ctx = Context::for_tests();
        let result = validator().validate(None, &ctx).unwrap();
        assert_eq!(result.status(), Status::NotFound);
    }

    #[test]
    fn patch_and_minor_differences_are_ok() {
        let ctx = Context::for_tests();
        let v = validator();
        assert_eq!(
            v.validate(python_info_with("2", "0", "1"), &ctx)
                .unwrap()
                .status(),
            Status::Ok
        );
        assert_eq!(
            v.validate(python_info_with("2", "12", "0"), &ctx)
                .unwrap()
                .status(),
            Status::Ok
        );
    }

    #[test]
    fn lower_major_requires_upgrade() {
        let ctx = Context::for_tests();
        let result = validator()
            .validate(python_info_with("1", "0", "0"), &ctx)
            .unwrap();
        assert_eq!(result.status(), Status::UpgradeRequired);
    }

    #[test]
    fn default_expectation_applies_without_config() {
        let mut registry = Registry::new();
        register(&mut registry, &InspectorConfig::default());

        let ctx = Context::for_tests();
        let entry = registry.get(ID).unwrap();
        let status = entry
            .validator()
            .unwrap()
            .validate(python_info_with("3", "11", "4"), &ctx)
            .unwrap()
            .status();
        assert_eq!(status, Status::Ok);
    }

    #[cfg(unix)]
    fn fake_interpreter(dir: &std::path::Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    #[cfg(unix)]
    #[test]
    fn broken_candidate_falls_back_to_next() {
        let temp = tempfile::TempDir::new().unwrap();
        let stub = fake_interpreter(temp.path(), "python3", "exit 1");
        let real = fake_interpreter(temp.path(), "python", "echo Python 2.7.18 >&2");

        let logger = MockLogger::new();
        let ctx = Context::new("test", Box::new(logger.clone()));
        let data = PythonInfoCollector::with_candidates([stub, real.clone()])
            .collect(&ctx)
            .unwrap()
            .unwrap();

        let info = data.downcast_ref::<PythonInfo>().unwrap();
        assert_eq!(info.version, SemVer::new(2, 7, 18));
        assert_eq!(info.path, PathBuf::from(real));
        assert!(logger.has_warning("is unusable"));
    }

    #[cfg(unix)]
    #[test]
    fn every_candidate_broken_is_collection_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let stub = fake_interpreter(temp.path(), "python3", "exit 1");

        let ctx = Context::for_tests();
        let err = PythonInfoCollector::with_candidates([stub, "no-such-python-xyz".to_string()])
            .collect(&ctx)
            .unwrap_err();
        assert!(matches!(err, crate::error::InspectorError::Collection { .. }));
    }

    #[test]
    fn no_candidate_on_path_is_absent() {
        let logger = MockLogger::new();
        let ctx = Context::new("test", Box::new(logger.clone()));
        let data = PythonInfoCollector::with_candidates(["no-such-python-xyz"])
            .collect(&ctx)
            .unwrap();
        assert!(data.is_none());
        assert!(logger.has_warning("Python not installed"));
    }
}
