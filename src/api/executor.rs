//! The collect → validate → react → dispatch pipeline.
//!
//! Components run one at a time in registration order. A failure while
//! collecting, validating or reacting is logged and recorded against that
//! component only; the run moves on to the next one. A failure while
//! dispatching aborts the whole call so remediation never half-applies
//! unnoticed.

use super::collector::Data;
use super::context::{Context, Ineligible};
use super::handler::{default_handler, CommandHandler};
use super::registry::ComponentEntry;
use super::validator::{Status, ValidationResult};
use crate::error::{InspectorError, Result, Stage};

/// What happened to one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeState {
    /// Not eligible for this run.
    Skipped(Ineligible),

    /// All registered stages ran.
    Completed {
        /// Validation status, when a validator is registered.
        status: Option<Status>,
        /// Number of commands handed to the handler.
        dispatched: usize,
    },

    /// A stage before dispatch failed.
    Failed { stage: Stage, message: String },
}

/// Outcome for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOutcome {
    pub id: String,
    pub state: OutcomeState,
}

impl ComponentOutcome {
    /// Whether this component needs the user's attention.
    pub fn is_problem(&self) -> bool {
        match &self.state {
            OutcomeState::Skipped(_) => false,
            OutcomeState::Completed { status, .. } => status.is_some_and(|s| s.is_problem()),
            OutcomeState::Failed { .. } => true,
        }
    }
}

/// Per-component outcomes of one `execute` call, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub outcomes: Vec<ComponentOutcome>,
}

impl ExecutionReport {
    pub fn get(&self, id: &str) -> Option<&OutcomeState> {
        self.outcomes.iter().find(|o| o.id == id).map(|o| &o.state)
    }

    /// Components that ran and need attention.
    pub fn problems(&self) -> impl Iterator<Item = &ComponentOutcome> {
        self.outcomes.iter().filter(|o| o.is_problem())
    }

    /// Total commands dispatched across all components.
    pub fn dispatched(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.state {
                OutcomeState::Completed { dispatched, .. } => dispatched,
                _ => 0,
            })
            .sum()
    }
}

/// Drives every registered component through the pipeline.
#[derive(Debug, Default)]
pub struct Executor;

impl Executor {
    pub fn new() -> Self {
        Self
    }

    /// Run with the handler chosen by [`default_handler`].
    pub fn execute(&self, ctx: &Context) -> Result<Option<ExecutionReport>> {
        self.execute_with(ctx, default_handler)
    }

    /// Run with a caller-supplied handler resolver.
    ///
    /// Returns `Ok(None)` without resolving a handler when nothing is
    /// registered. Otherwise the resolver is called exactly once, before the
    /// first component runs.
    pub fn execute_with<'h, F>(&self, ctx: &Context, get_handler: F) -> Result<Option<ExecutionReport>>
    where
        F: FnOnce(&Context) -> Box<dyn CommandHandler + 'h>,
    {
        let registry = ctx.registry();
        if registry.is_empty() {
            tracing::debug!("Registry is empty, nothing to execute");
            return Ok(None);
        }

        let mut handler = get_handler(ctx);
        let mut report = ExecutionReport::default();

        for entry in registry.iter() {
            let state = self.run_component(entry, ctx, handler.as_mut())?;
            report.outcomes.push(ComponentOutcome {
                id: entry.id().to_string(),
                state,
            });
        }

        Ok(Some(report))
    }

    fn run_component(
        &self,
        entry: &ComponentEntry,
        ctx: &Context,
        handler: &mut dyn CommandHandler,
    ) -> Result<OutcomeState> {
        let id = entry.id();

        if let Err(reason) = ctx.eligibility(id, entry.capabilities()) {
            tracing::debug!(component = id, "Skipping: {}", reason);
            ctx.logger().debug(&format!("Skipping '{}': {}", id, reason));
            return Ok(OutcomeState::Skipped(reason));
        }

        tracing::debug!(component = id, "Collecting");
        let data = match entry.collector() {
            Some(collector) => match collector.collect(ctx) {
                Ok(data) => data,
                Err(e) => return Ok(contain(ctx, id, Stage::Collect, e)),
            },
            None => None,
        };

        let (result, status) = match entry.validator() {
            Some(validator) => {
                tracing::debug!(component = id, "Validating");
                match validator.validate(data, ctx) {
                    Ok(result) => {
                        let status = result.status();
                        report_status(ctx, id, status);
                        (result, Some(status))
                    }
                    Err(e) => return Ok(contain(ctx, id, Stage::Validate, e)),
                }
            }
            None => (unjudged(data), None),
        };

        let commands = match entry.reactor() {
            Some(reactor) => {
                tracing::debug!(component = id, "Reacting");
                match reactor.react(&result, ctx) {
                    Ok(commands) => commands,
                    Err(e) => return Ok(contain(ctx, id, Stage::React, e)),
                }
            }
            None => Vec::new(),
        };

        for command in &commands {
            tracing::debug!(component = id, "Dispatching `{}`", command);
            handler
                .handle(command, ctx)
                .map_err(|e| InspectorError::Dispatch {
                    component: id.to_string(),
                    command: command.to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(OutcomeState::Completed {
            status,
            dispatched: commands.len(),
        })
    }
}

/// Result handed to a reactor when no validator is registered: absent data is
/// `NotFound`, present data passes through as `Ok`.
fn unjudged(data: Option<Data>) -> ValidationResult {
    match data {
        Some(data) => ValidationResult::new(Some(data), Status::Ok),
        None => ValidationResult::not_found(),
    }
}

fn contain(ctx: &Context, id: &str, stage: Stage, error: InspectorError) -> OutcomeState {
    tracing::debug!(component = id, %stage, "Stage failed: {}", error);
    ctx.logger()
        .error(&format!("Failed to {} '{}': {}", stage, id, error));
    OutcomeState::Failed {
        stage,
        message: error.to_string(),
    }
}

fn report_status(ctx: &Context, id: &str, status: Status) {
    let message = format!("{} {}: {}", status.display_char(), id, status);
    match status {
        Status::Ok => ctx.logger().success(&message),
        Status::NotFound | Status::UpgradeRequired | Status::DowngradeRequired => {
            ctx.logger().warn(&message)
        }
        Status::Error => ctx.logger().failure(&message),
    }
}
