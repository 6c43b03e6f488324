//! Plugin API: the roles a component can fill and the pipeline that runs them.
//!
//! A component is identified by a string id and contributes up to three
//! roles to the [`Registry`]:
//!
//! - a [`Collector`] gathering raw data about the machine,
//! - a [`Validator`] judging that data into a [`ValidationResult`],
//! - a [`Reactor`] turning the result into [`ReactorCommand`]s.
//!
//! The [`Executor`] drives each registered component through these stages
//! and hands commands to a [`CommandHandler`].

pub mod capability;
pub mod collector;
pub mod context;
pub mod executor;
pub mod handler;
pub mod reactor;
pub mod registry;
pub mod validator;

pub use capability::{Capabilities, Platform};
pub use collector::{Collector, ComponentData, Data};
pub use context::{Context, Ineligible, RunFlags};
pub use executor::{ComponentOutcome, ExecutionReport, Executor, OutcomeState};
pub use handler::{
    default_handler, CommandHandler, ConfirmingHandler, DryRunHandler, ShellHandler,
    SuggestingHandler,
};
pub use reactor::{Reactor, ReactorCommand};
pub use registry::{ComponentEntry, Registry};
pub use validator::{validate_version, Status, ValidationResult, Validator};
