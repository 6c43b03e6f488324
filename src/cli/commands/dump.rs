//! The `inspector dump` command.

use crate::api::Context;
use crate::cli::args::DumpArgs;
use crate::dump;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult};

pub struct DumpCommand {
    args: DumpArgs,
}

impl DumpCommand {
    pub fn new(args: DumpArgs) -> Self {
        Self { args }
    }
}

impl Command for DumpCommand {
    fn execute(&self, ctx: &mut Context) -> Result<CommandResult> {
        dump::run(ctx, self.args.output.clone())?;
        Ok(CommandResult::success())
    }
}
