//! Validator contract, validation statuses and results.
//!
//! Validators interpret collected data. A missing tool or a wrong version is
//! a normal [`Status`], never an error; errors are reserved for internal
//! invariant violations.

use std::fmt;

use super::collector::{ComponentData, Data};
use super::context::Context;
use crate::error::Result;
use crate::semver::{SemVer, VersionCheck};

/// Outcome of validating a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    NotFound,
    UpgradeRequired,
    DowngradeRequired,
    Error,
}

impl Status {
    /// Whether the component needs attention.
    pub fn is_problem(&self) -> bool {
        !matches!(self, Status::Ok)
    }

    /// Status for an installed version measured against an expectation.
    pub fn for_version(installed: &SemVer, expected: &SemVer) -> Self {
        match installed.check_against(expected) {
            VersionCheck::Compatible => Status::Ok,
            VersionCheck::UpgradeRequired => Status::UpgradeRequired,
            VersionCheck::DowngradeRequired => Status::DowngradeRequired,
        }
    }

    /// Get a display character for this status.
    pub fn display_char(&self) -> char {
        match self {
            Status::Ok => '✓',
            Status::NotFound => '○',
            Status::UpgradeRequired => '↑',
            Status::DowngradeRequired => '↓',
            Status::Error => '✗',
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Ok => "ok",
            Status::NotFound => "not found",
            Status::UpgradeRequired => "upgrade required",
            Status::DowngradeRequired => "downgrade required",
            Status::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// The collected data paired with its status. Immutable once built.
#[derive(Debug)]
pub struct ValidationResult {
    data: Option<Data>,
    status: Status,
}

impl ValidationResult {
    /// Pair data with a status.
    pub fn new(data: Option<Data>, status: Status) -> Self {
        Self { data, status }
    }

    /// Result for absent data.
    pub fn not_found() -> Self {
        Self::new(None, Status::NotFound)
    }

    /// The status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The collected data, exactly as handed to the validator.
    pub fn data(&self) -> Option<&dyn ComponentData> {
        self.data.as_deref()
    }

    /// The collected data as `T`.
    pub fn data_as<T: 'static>(&self) -> Option<&T> {
        self.data().and_then(|d| d.downcast_ref::<T>())
    }

    /// Give the data back.
    pub fn into_data(self) -> Option<Data> {
        self.data
    }
}

/// Interprets collected data into a [`ValidationResult`].
pub trait Validator {
    /// Validate `data`; absent data must map to [`Status::NotFound`].
    fn validate(&self, data: Option<Data>, ctx: &Context) -> Result<ValidationResult>;
}

impl<F> Validator for F
where
    F: Fn(Option<Data>, &Context) -> Result<ValidationResult>,
{
    fn validate(&self, data: Option<Data>, ctx: &Context) -> Result<ValidationResult> {
        self(data, ctx)
    }
}

/// Shared rule for version-bearing tool info.
///
/// Absent data is `NotFound`; data of an unexpected type is an invariant
/// violation; a missing expectation accepts any installed version.
pub fn validate_version<T, F>(
    component: &str,
    data: Option<Data>,
    expected: Option<&SemVer>,
    version_of: F,
) -> Result<ValidationResult>
where
    T: 'static,
    F: Fn(&T) -> Option<SemVer>,
{
    let Some(data) = data else {
        return Ok(ValidationResult::not_found());
    };

    let Some(info) = data.downcast_ref::<T>() else {
        return Err(crate::error::InspectorError::validation(
            component,
            format!("unexpected data: {:?}", data),
        ));
    };

    let status = match (version_of(info), expected) {
        (_, None) => Status::Ok,
        (Some(installed), Some(expected)) => Status::for_version(&installed, expected),
        (None, Some(_)) => Status::Error,
    };

    Ok(ValidationResult::new(Some(data), status))
}
