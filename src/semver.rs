//! Three-part version values and the compatibility rules every validator uses.
//!
//! Parsing is tolerant: missing or non-numeric segments become `0`, so tool
//! output such as `"unknown"` or `"3.11"` never fails to compare.
//!
//! # Example
//!
//! ```
//! use inspector::semver::{SemVer, VersionCheck};
//!
//! let expected = SemVer::parse("6.4.0");
//! assert_eq!(SemVer::parse("6.5.1").check_against(&expected), VersionCheck::Compatible);
//! assert_eq!(SemVer::parse("5.9.9").check_against(&expected), VersionCheck::UpgradeRequired);
//! assert_eq!(SemVer::parse("7").check_against(&expected), VersionCheck::DowngradeRequired);
//! ```

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An immutable `major.minor.patch` triple.
///
/// Ordering is lexicographic over `(major, minor, patch)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Outcome of comparing an installed version with an expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    /// Majors match; minor and patch differences are tolerated.
    Compatible,
    /// Installed major is lower than expected.
    UpgradeRequired,
    /// Installed major is higher than expected.
    DowngradeRequired,
}

impl SemVer {
    /// Create a version from numeric parts.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a raw version string such as `"v1.24.0"`, `"3.11"` or `"unknown"`.
    ///
    /// Only the first three dot-separated segments are read. Each segment
    /// contributes its leading digits (`"4rc1"` reads as `4`); anything else
    /// reads as `0`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let mut parts = trimmed.split('.').map(parse_segment);
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        }
    }

    /// Parse an optional raw value; absent input reads as `0.0.0`.
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Build from separately captured segments, each parsed tolerantly.
    pub fn from_parts(major: &str, minor: &str, patch: &str) -> Self {
        Self {
            major: parse_segment(major),
            minor: parse_segment(minor),
            patch: parse_segment(patch),
        }
    }

    /// Two versions are compatible iff their majors are equal.
    pub fn is_compatible_with(&self, expected: &SemVer) -> bool {
        self.major == expected.major
    }

    /// Total ordering against another version.
    pub fn compare(&self, other: &SemVer) -> Ordering {
        self.cmp(other)
    }

    /// Decide whether this (installed) version satisfies `expected`.
    ///
    /// The major segment alone decides the direction.
    pub fn check_against(&self, expected: &SemVer) -> VersionCheck {
        match self.major.cmp(&expected.major) {
            Ordering::Equal => VersionCheck::Compatible,
            Ordering::Less => VersionCheck::UpgradeRequired,
            Ordering::Greater => VersionCheck::DowngradeRequired,
        }
    }
}

fn parse_segment(segment: &str) -> u64 {
    let digits: String = segment
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemVer {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
