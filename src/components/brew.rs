//! Homebrew.

use super::command::{CommandCollector, CommandValidator};
use crate::api::{Capabilities, Context, ReactorCommand, Registry, Status, ValidationResult};
use crate::config::InspectorConfig;
use crate::error::Result;

pub const ID: &str = "brew";

const INSTALL_SCRIPT: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// Command that downloads a script with `fetch` and runs it with bash.
///
/// The outer bash performs the substitution; the inner one receives the
/// whole script body as a single argument.
pub fn run_fetched_script(fetch: &str) -> ReactorCommand {
    let script = format!("/bin/bash -c \"$({})\"", fetch);
    ReactorCommand::new(["/bin/bash", "-c", script.as_str()])
}

/// Suggest the official installer when Homebrew is missing.
pub fn install_reactor(result: &ValidationResult, _ctx: &Context) -> Result<Vec<ReactorCommand>> {
    if result.status() != Status::NotFound {
        return Ok(Vec::new());
    }
    let fetch = format!("curl -fsSL {}", INSTALL_SCRIPT);
    Ok(vec![run_fetched_script(&fetch).with_description("install Homebrew")])
}

pub fn register(registry: &mut Registry, config: &InspectorConfig) {
    registry.register_collector(ID, CommandCollector::new("brew"));
    registry.register_validator(ID, CommandValidator::new(ID, config.expected_version(ID, None)));
    registry.register_reactor(ID, install_reactor);
    registry.set_capabilities(ID, Capabilities::macos());
}
