//! Generic "is this executable installed, and which version" component.

use std::path::PathBuf;

use super::extract_version;
use crate::api::{validate_version, Collector, Context, Data, ValidationResult, Validator};
use crate::error::{InspectorError, Result};
use crate::semver::SemVer;
use crate::shell::{self, CommandOptions};

/// What a [`CommandCollector`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Resolved executable path.
    pub path: PathBuf,
    /// Version parsed from the probe output, if any.
    pub version: Option<SemVer>,
    /// Trimmed probe output.
    pub raw: String,
}

/// Looks up an executable on `PATH` and asks it for its version.
#[derive(Debug, Clone)]
pub struct CommandCollector {
    executable: String,
    version_args: Vec<String>,
    timeout: Option<u64>,
}

impl CommandCollector {
    /// Probe `executable --version`.
    pub fn new(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
            version_args: vec!["--version".to_string()],
            timeout: Some(30),
        }
    }

    /// Use different arguments for the version probe.
    pub fn with_version_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.version_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Run the probe and parse the result.
    ///
    /// `Ok(None)` when the executable is not on `PATH`.
    pub fn probe(&self) -> Result<Option<CommandInfo>> {
        let Some(path) = shell::which(&self.executable) else {
            return Ok(None);
        };

        let mut argv = vec![path.to_string_lossy().to_string()];
        argv.extend(self.version_args.iter().cloned());

        let options = CommandOptions {
            capture: true,
            timeout: self.timeout,
            ..Default::default()
        };
        let result = shell::execute(&argv, &options)
            .map_err(|e| InspectorError::collection(&self.executable, e.to_string()))?;

        if !result.success {
            return Err(InspectorError::collection(
                &self.executable,
                format!(
                    "`{}` exited with code {:?}",
                    argv.join(" "),
                    result.exit_code
                ),
            ));
        }

        let raw = result.combined_output().trim().to_string();
        Ok(Some(CommandInfo {
            path,
            version: extract_version(&raw),
            raw,
        }))
    }
}

impl Collector for CommandCollector {
    fn collect(&self, ctx: &Context) -> Result<Option<Data>> {
        match self.probe()? {
            Some(info) => {
                ctx.logger().debug(&format!(
                    "Found {} at {}",
                    self.executable,
                    info.path.display()
                ));
                Ok(Some(Box::new(info)))
            }
            None => {
                ctx.logger()
                    .warn(&format!("'{}' not installed", self.executable));
                Ok(None)
            }
        }
    }
}

/// Applies the shared version rule to a [`CommandInfo`].
#[derive(Debug, Clone)]
pub struct CommandValidator {
    id: String,
    expected: Option<SemVer>,
}

impl CommandValidator {
    pub fn new(id: &str, expected: Option<SemVer>) -> Self {
        Self {
            id: id.to_string(),
            expected,
        }
    }
}

impl Validator for CommandValidator {
    fn validate(&self, data: Option<Data>, _ctx: &Context) -> Result<ValidationResult> {
        validate_version::<CommandInfo, _>(&self.id, data, self.expected.as_ref(), |info| {
            info.version
        })
    }
}
