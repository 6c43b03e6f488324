//! User-facing output.
//!
//! This module provides:
//! - [`Logger`] trait, the leveled sink carried by the run context
//! - [`ConsoleLogger`] for terminal usage
//! - [`MockLogger`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use inspector::ui::{Logger, MockLogger};
//!
//! let logger = MockLogger::new();
//! logger.progress("Inspecting bazel...");
//! logger.warn("'brew' not installed");
//!
//! assert!(logger.has_progress("bazel"));
//! assert!(logger.has_warning("brew"));
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockLogger;
pub use terminal::ConsoleLogger;
pub use theme::{should_use_colors, InspectorTheme};

use crate::error::Result;

/// Target used when console output is mirrored into `tracing`.
pub const CONSOLE_TARGET: &str = "inspector::console";

/// Severity of a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Progress,
    Success,
    Failure,
}

/// Leveled output sink.
///
/// All methods take `&self`; the logger is shared through the read-only
/// run context.
pub trait Logger {
    /// Diagnostic detail, shown only in debug mode.
    fn debug(&self, msg: &str);

    /// Plain informational message.
    fn info(&self, msg: &str);

    /// Something was skipped or looks off.
    fn warn(&self, msg: &str);

    /// A stage or task failed.
    fn error(&self, msg: &str);

    /// A unit of work is starting.
    fn progress(&self, msg: &str);

    /// A unit of work finished well.
    fn success(&self, msg: &str);

    /// The whole run failed.
    fn failure(&self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;
}
