//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::api::Context;
use crate::cli::args::{Cli, Commands, InspectArgs};
use crate::error::Result;

/// A CLI subcommand's execution logic.
pub trait Command {
    fn execute(&self, ctx: &mut Context) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Routes CLI subcommands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command; no subcommand runs `inspect`.
    pub fn dispatch(&self, cli: &Cli, ctx: &mut Context) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Inspect(args)) => {
                super::inspect::InspectCommand::new(args.clone()).execute(ctx)
            }
            Some(Commands::List) => super::list::ListCommand.execute(ctx),
            Some(Commands::Dump(args)) => super::dump::DumpCommand::new(args.clone()).execute(ctx),
            None => super::inspect::InspectCommand::new(InspectArgs::default()).execute(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockLogger;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn list_subcommand_is_routed() {
        let logger = MockLogger::new();
        let mut ctx = Context::new("inspector", Box::new(logger.clone()));
        let cli = Cli::parse_from(["inspector", "list"]);

        let result = CommandDispatcher::new().dispatch(&cli, &mut ctx).unwrap();

        assert_eq!(result, CommandResult::success());
        assert!(logger.has_info("python [collect, validate]"));
    }
}
