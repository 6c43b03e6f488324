//! Inspector - checks the developer tools installed on a machine.
//!
//! Components plug into a small pipeline: a collector gathers facts about a
//! tool, a validator judges them, a reactor proposes fixes and a command
//! handler applies (or only prints) those fixes. A separate dump mode packs
//! environment diagnostics into an archive for support.
//!
//! # Modules
//!
//! - [`api`] - Plugin roles, registry, context and executor
//! - [`cli`] - Command-line interface and argument parsing
//! - [`components`] - Built-in components (brew, python, bazel)
//! - [`config`] - JSON run configuration
//! - [`dump`] - Environment dump archive
//! - [`error`] - Error types and result aliases
//! - [`semver`] - Version parsing and compatibility
//! - [`shell`] - Process execution and PATH lookup
//! - [`ui`] - Leveled console output
//!
//! # Example
//!
//! ```
//! use inspector::api::{Context, Data, Executor, Status, ValidationResult};
//! use inspector::error::Result;
//! use inspector::ui::MockLogger;
//!
//! let mut ctx = Context::new("example", Box::new(MockLogger::new()));
//! ctx.registry_mut().register_collector("tool", |_: &Context| -> Result<Option<Data>> {
//!     Ok(Some(Box::new("1.2.3")))
//! });
//! ctx.registry_mut().register_validator(
//!     "tool",
//!     |data: Option<Data>, _: &Context| -> Result<ValidationResult> {
//!         Ok(ValidationResult::new(data, Status::Ok))
//!     },
//! );
//!
//! let report = Executor::new().execute(&ctx).unwrap().unwrap();
//! assert_eq!(report.problems().count(), 0);
//! ```

pub mod api;
pub mod cli;
pub mod components;
pub mod config;
pub mod dump;
pub mod error;
pub mod semver;
pub mod shell;
pub mod ui;

pub use error::{InspectorError, Result};
