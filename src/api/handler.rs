//! Command handlers: where reactor commands end up.
//!
//! The executor resolves one handler per `execute` call and feeds it every
//! command in the order reactors produced them. A handler error aborts the
//! call.

use super::context::Context;
use super::reactor::ReactorCommand;
use crate::error::{InspectorError, Result};
use crate::shell::{execute, CommandOptions};

/// Receives remediation commands.
pub trait CommandHandler {
    fn handle(&mut self, command: &ReactorCommand, ctx: &Context) -> Result<()>;
}

impl<H: CommandHandler + ?Sized> CommandHandler for &mut H {
    fn handle(&mut self, command: &ReactorCommand, ctx: &Context) -> Result<()> {
        (**self).handle(command, ctx)
    }
}

impl<H: CommandHandler + ?Sized> CommandHandler for Box<H> {
    fn handle(&mut self, command: &ReactorCommand, ctx: &Context) -> Result<()> {
        (**self).handle(command, ctx)
    }
}

fn describe(command: &ReactorCommand) -> String {
    match command.description() {
        Some(desc) => format!("{} ({})", command, desc),
        None => command.to_string(),
    }
}

/// Logs what would run and does nothing else.
#[derive(Debug, Default)]
pub struct DryRunHandler;

impl CommandHandler for DryRunHandler {
    fn handle(&mut self, command: &ReactorCommand, ctx: &Context) -> Result<()> {
        ctx.logger().info(&format!("[dry-run] would run: {}", describe(command)));
        Ok(())
    }
}

/// Prints each command as a suggestion for the user to run.
#[derive(Debug, Default)]
pub struct SuggestingHandler;

impl CommandHandler for SuggestingHandler {
    fn handle(&mut self, command: &ReactorCommand, ctx: &Context) -> Result<()> {
        ctx.logger().warn(&format!("Suggested fix: {}", describe(command)));
        Ok(())
    }
}

/// Runs each command and fails on a non-zero exit.
#[derive(Debug, Default)]
pub struct ShellHandler {
    options: CommandOptions,
}

impl ShellHandler {
    pub fn new(options: CommandOptions) -> Self {
        Self { options }
    }
}

impl CommandHandler for ShellHandler {
    fn handle(&mut self, command: &ReactorCommand, ctx: &Context) -> Result<()> {
        ctx.logger().progress(&format!("Running: {}", command));
        let result = execute(command.argv(), &self.options)?;
        if !result.success {
            return Err(InspectorError::CommandFailed {
                command: command.to_string(),
                code: result.exit_code,
            });
        }
        ctx.logger().success(&format!("Finished: {}", command));
        Ok(())
    }
}

/// Asks before each command; declined commands are skipped.
#[derive(Debug, Default)]
pub struct ConfirmingHandler {
    runner: ShellHandler,
}

impl ConfirmingHandler {
    pub fn new(runner: ShellHandler) -> Self {
        Self { runner }
    }
}

impl CommandHandler for ConfirmingHandler {
    fn handle(&mut self, command: &ReactorCommand, ctx: &Context) -> Result<()> {
        let question = format!("Run `{}`?", describe(command));
        if ctx.logger().confirm(&question, false)? {
            self.runner.handle(command, ctx)
        } else {
            ctx.logger().info(&format!("Skipped: {}", command));
            Ok(())
        }
    }
}

/// Pick the handler matching the run flags.
///
/// `--dry-run` wins over `--interactive`; without either, commands are only
/// suggested.
pub fn default_handler(ctx: &Context) -> Box<dyn CommandHandler> {
    let flags = ctx.flags();
    if flags.dry_run {
        Box::new(DryRunHandler)
    } else if flags.interactive {
        Box::new(ConfirmingHandler::default())
    } else {
        Box::new(SuggestingHandler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::context::RunFlags;
    use crate::ui::{LogLevel, MockLogger};

    fn ctx_with(flags: RunFlags, logger: &MockLogger) -> Context {
        Context::new("test", Box::new(logger.clone())).with_flags(flags)
    }

    #[test]
    fn dry_run_logs_without_running() {
        let logger = MockLogger::new();
        let ctx = ctx_with(RunFlags::default(), &logger);
        let cmd = ReactorCommand::new(["definitely-not-a-real-tool-xyz", "--fix"]);

        DryRunHandler.handle(&cmd, &ctx).unwrap();

        let infos = logger.messages(LogLevel::Info);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].contains("would run: definitely-not-a-real-tool-xyz --fix"));
    }

    #[test]
    fn suggesting_includes_description() {
        let logger = MockLogger::new();
        let ctx = ctx_with(RunFlags::default(), &logger);
        let cmd = ReactorCommand::new(["brew", "upgrade", "bazel"]).with_description("outdated");

        SuggestingHandler.handle(&cmd, &ctx).unwrap();

        assert!(logger.has_warning("brew upgrade bazel (outdated)"));
    }

    #[cfg(unix)]
    #[test]
    fn shell_handler_runs_command() {
        let logger = MockLogger::new();
        let ctx = ctx_with(RunFlags::default(), &logger);

        ShellHandler::default()
            .handle(&ReactorCommand::new(["true"]), &ctx)
            .unwrap();
        assert!(logger.has_success("Finished: true"));
    }

    #[cfg(unix)]
    #[test]
    fn shell_handler_fails_on_non_zero_exit() {
        let ctx = Context::for_tests();
        let err = ShellHandler::default()
            .handle(&ReactorCommand::new(["false"]), &ctx)
            .unwrap_err();
        assert!(matches!(err, InspectorError::CommandFailed { code: Some(1), .. }));
    }

    #[test]
    fn shell_handler_reports_missing_tool() {
        let ctx = Context::for_tests();
        let err = ShellHandler::default()
            .handle(&ReactorCommand::new(["definitely-not-a-real-tool-xyz"]), &ctx)
            .unwrap_err();
        assert!(matches!(err, InspectorError::CommandNotFound { .. }));
    }

    #[test]
    fn declined_confirmation_skips_command() {
        let logger = MockLogger::new();
        logger.queue_answers([false]);
        let ctx = ctx_with(RunFlags::default(), &logger);

        ConfirmingHandler::default()
            .handle(&ReactorCommand::new(["definitely-not-a-real-tool-xyz"]), &ctx)
            .unwrap();

        assert_eq!(logger.questions().len(), 1);
        assert!(logger.has_info("Skipped: definitely-not-a-real-tool-xyz"));
    }

    #[cfg(unix)]
    #[test]
    fn accepted_confirmation_runs_command() {
        let logger = MockLogger::new();
        logger.queue_answers([true]);
        let ctx = ctx_with(RunFlags::default(), &logger);

        ConfirmingHandler::default()
            .handle(&ReactorCommand::new(["true"]), &ctx)
            .unwrap();
        assert!(logger.has_success("Finished: true"));
    }

    #[test]
    fn default_handler_follows_flags() {
        let cmd = ReactorCommand::new(["brew", "install", "bazel"]);

        let logger = MockLogger::new();
        let ctx = ctx_with(
            RunFlags {
                dry_run: true,
                interactive: true,
                ..Default::default()
            },
            &logger,
        );
        default_handler(&ctx).handle(&cmd, &ctx).unwrap();
        assert!(logger.has_info("would run"));
        assert!(logger.questions().is_empty());

        let logger = MockLogger::new();
        let ctx = ctx_with(RunFlags::default(), &logger);
        default_handler(&ctx).handle(&cmd, &ctx).unwrap();
        assert!(logger.has_warning("Suggested fix: brew install bazel"));
    }
}
