//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`].

pub mod dispatcher;
pub mod dump;
pub mod inspect;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
