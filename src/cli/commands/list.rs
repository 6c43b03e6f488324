//! The `inspector list` command: show components and their capabilities.

use crate::api::{Context, Registry};
use crate::components::register_builtins;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

pub struct ListCommand;

/// One line per component: id, roles and capability flags.
pub fn describe_registry(registry: &Registry) -> Vec<String> {
    registry
        .iter()
        .map(|entry| {
            let roles: Vec<&str> = [
                entry.collector().map(|_| "collect"),
                entry.validator().map(|_| "validate"),
                entry.reactor().map(|_| "react"),
            ]
            .into_iter()
            .flatten()
            .collect();
            let caps = entry.capabilities().to_string();
            if caps.is_empty() {
                format!("{} [{}]", entry.id(), roles.join(", "))
            } else {
                format!("{} [{}] ({})", entry.id(), roles.join(", "), caps)
            }
        })
        .collect()
}

impl Command for ListCommand {
    fn execute(&self, ctx: &mut Context) -> Result<CommandResult> {
        let config = ctx.config().clone();
        register_builtins(ctx.registry_mut(), &config);

        ctx.logger().info("Components:");
        for line in describe_registry(ctx.registry()) {
            ctx.logger().info(&format!("  {}", line));
        }
        Ok(CommandResult::success())
    }
}
