//! Error types for inspector operations.
//!
//! This module defines [`InspectorError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Collect, validate and react failures are contained per component by the
//!   [`Executor`](crate::api::Executor); they are logged and the run goes on
//! - Dispatch failures are fatal for the `execute` call that produced them
//! - Use `anyhow::Error` (via `InspectorError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collect,
    Validate,
    React,
    Dispatch,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Collect => "collect",
            Stage::Validate => "validate",
            Stage::React => "react",
            Stage::Dispatch => "dispatch",
        };
        write!(f, "{}", s)
    }
}

/// Core error type for inspector operations.
#[derive(Debug, Error)]
pub enum InspectorError {
    /// A collector could not gather data for its component.
    #[error("Collection failed for '{component}': {message}")]
    Collection { component: String, message: String },

    /// A validator hit an internal invariant violation.
    #[error("Validation failed for '{component}': {message}")]
    Validation { component: String, message: String },

    /// A reactor could not build its command sequence.
    #[error("Reaction failed for '{component}': {message}")]
    Reaction { component: String, message: String },

    /// A command handler failed while applying a reaction.
    #[error("Dispatch of `{command}` for '{component}' failed: {source}")]
    Dispatch {
        component: String,
        command: String,
        #[source]
        source: Box<InspectorError>,
    },

    /// Executable could not be found.
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command exceeded its timeout and was killed.
    #[error("Command timed out after {seconds}s: {command}")]
    CommandTimedOut { command: String, seconds: u64 },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Operation not available on this operating system.
    #[error("Unsupported operating system '{platform}'")]
    UnsupportedPlatform { platform: String },

    /// Every independent top-level task failed.
    #[error("All {count} data collection tasks have failed")]
    AllTasksFailed { count: usize },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InspectorError {
    /// The pipeline stage this error belongs to, if it is a stage error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            InspectorError::Collection { .. } => Some(Stage::Collect),
            InspectorError::Validation { .. } => Some(Stage::Validate),
            InspectorError::Reaction { .. } => Some(Stage::React),
            InspectorError::Dispatch { .. } => Some(Stage::Dispatch),
            _ => None,
        }
    }

    /// Shorthand for a collection error.
    pub fn collection(component: &str, message: impl Into<String>) -> Self {
        InspectorError::Collection {
            component: component.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a validation error.
    pub fn validation(component: &str, message: impl Into<String>) -> Self {
        InspectorError::Validation {
            component: component.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a reaction error.
    pub fn reaction(component: &str, message: impl Into<String>) -> Self {
        InspectorError::Reaction {
            component: component.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for inspector operations.
pub type Result<T> = std::result::Result<T, InspectorError>;
