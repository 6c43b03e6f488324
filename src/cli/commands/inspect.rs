//! The `inspector inspect` command: run every eligible component.

use crate::api::{Context, Executor, OutcomeState};
use crate::cli::args::InspectArgs;
use crate::components::register_builtins;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

pub struct InspectCommand {
    args: InspectArgs,
}

impl InspectCommand {
    pub fn new(args: InspectArgs) -> Self {
        Self { args }
    }

    pub fn args(&self) -> &InspectArgs {
        &self.args
    }
}

impl Command for InspectCommand {
    fn execute(&self, ctx: &mut Context) -> Result<CommandResult> {
        let config = ctx.config().clone();
        register_builtins(ctx.registry_mut(), &config);

        ctx.logger().progress("Inspecting developer tools...");
        let Some(report) = Executor::new().execute(ctx)? else {
            ctx.logger().info("No components to inspect");
            return Ok(CommandResult::success());
        };

        let skipped = report
            .outcomes
            .iter()
            .filter(|o| matches!(o.state, OutcomeState::Skipped(_)))
            .count();
        let problems = report.problems().count();

        if skipped > 0 {
            ctx.logger()
                .debug(&format!("{} component(s) skipped", skipped));
        }
        if problems == 0 {
            ctx.logger().success("All checks passed");
        } else {
            ctx.logger()
                .warn(&format!("{} component(s) need attention", problems));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RunFlags;
    use crate::config::{ComponentConfig, InspectorConfig};
    use crate::ui::MockLogger;

    fn all_disabled() -> InspectorConfig {
        let mut config = InspectorConfig::default();
        for id in ["brew", "python", "bazel"] {
            config.components.insert(
                id.into(),
                ComponentConfig {
                    enabled: false,
                    expected_version: None,
                },
            );
        }
        config
    }

    #[test]
    fn nothing_registered_is_success() {
        let logger = MockLogger::new();
        let mut ctx = Context::new("inspector", Box::new(logger.clone())).with_config(all_disabled());

        let result = InspectCommand::new(InspectArgs::default())
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result, CommandResult::success());
        assert!(logger.has_info("No components to inspect"));
    }

    #[test]
    fn skipped_components_are_not_problems() {
        let logger = MockLogger::new();
        let mut ctx = Context::new("inspector", Box::new(logger.clone())).with_flags(RunFlags {
            only: vec!["nothing-matches".into()],
            dry_run: true,
            ..Default::default()
        });

        let result = InspectCommand::new(InspectArgs::default())
            .execute(&mut ctx)
            .unwrap();
        assert!(result.success);
        assert!(logger.has_success("All checks passed"));
    }
}
