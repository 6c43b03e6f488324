//! Reactor contract and reaction commands.
//!
//! A reactor turns a [`ValidationResult`] into an ordered list of
//! [`ReactorCommand`]s. Each `react` call builds a fresh list; the executor
//! dispatches it once, in order.

use std::fmt;

use super::context::Context;
use super::validator::ValidationResult;
use crate::error::Result;

/// An invokable remediation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactorCommand {
    argv: Vec<String>,
    description: Option<String>,
}

impl ReactorCommand {
    /// Create a command from argv tokens.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The argv tokens.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// The executable (first token), if any.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for ReactorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// Turns a validation outcome into remediation commands.
pub trait Reactor {
    /// Commands to dispatch, in order. Empty when no action is warranted.
    fn react(&self, result: &ValidationResult, ctx: &Context) -> Result<Vec<ReactorCommand>>;
}

impl<F> Reactor for F
where
    F: Fn(&ValidationResult, &Context) -> Result<Vec<ReactorCommand>>,
{
    fn react(&self, result: &ValidationResult, ctx: &Context) -> Result<Vec<ReactorCommand>> {
        self(result, ctx)
    }
}
