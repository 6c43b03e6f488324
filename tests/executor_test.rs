//! Pipeline behaviour of the executor through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use inspector::api::{
    Collector, CommandHandler, Context, Data, Executor, OutcomeState, Reactor, ReactorCommand,
    Status, ValidationResult, Validator,
};
use inspector::error::{InspectorError, Result, Stage};
use inspector::ui::MockLogger;

type Events = Rc<RefCell<Vec<String>>>;

fn events() -> Events {
    Rc::new(RefCell::new(Vec::new()))
}

struct RecordingCollector {
    id: &'static str,
    events: Events,
    fail: bool,
}

impl Collector for RecordingCollector {
    fn collect(&self, _ctx: &Context) -> Result<Option<Data>> {
        self.events.borrow_mut().push(format!("collect:{}", self.id));
        if self.fail {
            return Err(InspectorError::collection(self.id, "probe exploded"));
        }
        Ok(Some(Box::new(self.id.to_string())))
    }
}

struct RecordingValidator {
    id: &'static str,
    events: Events,
}

impl Validator for RecordingValidator {
    fn validate(&self, data: Option<Data>, _ctx: &Context) -> Result<ValidationResult> {
        self.events.borrow_mut().push(format!("validate:{}", self.id));
        let status = if data.is_some() {
            Status::Ok
        } else {
            Status::NotFound
        };
        Ok(ValidationResult::new(data, status))
    }
}

struct RecordingReactor {
    id: &'static str,
    events: Events,
    commands: usize,
}

impl Reactor for RecordingReactor {
    fn react(&self, _result: &ValidationResult, _ctx: &Context) -> Result<Vec<ReactorCommand>> {
        self.events.borrow_mut().push(format!("react:{}", self.id));
        Ok((0..self.commands)
            .map(|i| ReactorCommand::new(["fix".to_string(), format!("{}-{}", self.id, i)]))
            .collect())
    }
}

struct RecordingHandler {
    events: Events,
    fail: bool,
}

impl CommandHandler for RecordingHandler {
    fn handle(&mut self, command: &ReactorCommand, _ctx: &Context) -> Result<()> {
        self.events.borrow_mut().push(format!("dispatch:{}", command));
        if self.fail {
            return Err(InspectorError::CommandFailed {
                command: command.to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

fn register_full(ctx: &mut Context, id: &'static str, events: &Events, commands: usize) {
    let registry = ctx.registry_mut();
    registry.register_collector(
        id,
        RecordingCollector {
            id,
            events: events.clone(),
            fail: false,
        },
    );
    registry.register_validator(
        id,
        RecordingValidator {
            id,
            events: events.clone(),
        },
    );
    registry.register_reactor(
        id,
        RecordingReactor {
            id,
            events: events.clone(),
            commands,
        },
    );
}

fn context() -> Context {
    Context::new("test", Box::new(MockLogger::new()))
}

#[test]
fn empty_registry_invokes_no_handler() {
    let ctx = context();
    let resolutions = RefCell::new(0);

    let report = Executor::new()
        .execute_with(&ctx, |_| {
            *resolutions.borrow_mut() += 1;
            Box::new(RecordingHandler {
                events: events(),
                fail: true,
            })
        })
        .unwrap();

    assert!(report.is_none());
    assert_eq!(*resolutions.borrow(), 0);
}

#[test]
fn collector_only_component_collects_without_error() {
    let log = events();
    let mut ctx = context();
    ctx.registry_mut().register_collector(
        "solo",
        RecordingCollector {
            id: "solo",
            events: log.clone(),
            fail: false,
        },
    );

    let report = Executor::new().execute(&ctx).unwrap().unwrap();

    assert_eq!(*log.borrow(), vec!["collect:solo"]);
    assert_eq!(
        report.get("solo"),
        Some(&OutcomeState::Completed {
            status: None,
            dispatched: 0
        })
    );
}

#[test]
fn handler_resolved_once_and_receives_commands_in_order() {
    let log = events();
    let mut ctx = context();
    register_full(&mut ctx, "a", &log, 3);
    register_full(&mut ctx, "b", &log, 2);

    let resolutions = RefCell::new(0);
    let report = Executor::new()
        .execute_with(&ctx, |_| {
            *resolutions.borrow_mut() += 1;
            Box::new(RecordingHandler {
                events: log.clone(),
                fail: false,
            })
        })
        .unwrap()
        .unwrap();

    assert_eq!(*resolutions.borrow(), 1);
    assert_eq!(
        *log.borrow(),
        vec![
            "collect:a",
            "validate:a",
            "react:a",
            "dispatch:fix a-0",
            "dispatch:fix a-1",
            "dispatch:fix a-2",
            "collect:b",
            "validate:b",
            "react:b",
            "dispatch:fix b-0",
            "dispatch:fix b-1",
        ]
    );
    assert_eq!(report.dispatched(), 5);
}

#[test]
fn dispatch_failure_propagates_after_prior_stages() {
    let log = events();
    let mut ctx = context();
    register_full(&mut ctx, "a", &log, 2);
    register_full(&mut ctx, "b", &log, 1);

    let err = Executor::new()
        .execute_with(&ctx, |_| {
            Box::new(RecordingHandler {
                events: log.clone(),
                fail: true,
            })
        })
        .unwrap_err();

    match &err {
        InspectorError::Dispatch {
            component, command, ..
        } => {
            assert_eq!(component, "a");
            assert_eq!(command, "fix a-0");
        }
        other => panic!("expected dispatch error, got {:?}", other),
    }
    assert_eq!(err.stage(), Some(Stage::Dispatch));
    assert_eq!(
        *log.borrow(),
        vec!["collect:a", "validate:a", "react:a", "dispatch:fix a-0"]
    );
}

#[test]
fn failing_collector_does_not_affect_other_components() {
    let log = events();
    let logger = MockLogger::new();
    let mut ctx = Context::new("test", Box::new(logger.clone()));
    ctx.registry_mut().register_collector(
        "a",
        RecordingCollector {
            id: "a",
            events: log.clone(),
            fail: true,
        },
    );
    ctx.registry_mut().register_validator(
        "a",
        RecordingValidator {
            id: "a",
            events: log.clone(),
        },
    );
    ctx.registry_mut().register_collector(
        "b",
        RecordingCollector {
            id: "b",
            events: log.clone(),
            fail: false,
        },
    );
    ctx.registry_mut().register_validator(
        "b",
        RecordingValidator {
            id: "b",
            events: log.clone(),
        },
    );

    let report = Executor::new().execute(&ctx).unwrap().unwrap();

    assert_eq!(*log.borrow(), vec!["collect:a", "collect:b", "validate:b"]);
    assert!(matches!(
        report.get("a"),
        Some(OutcomeState::Failed {
            stage: Stage::Collect,
            ..
        })
    ));
    assert_eq!(
        report.get("b"),
        Some(&OutcomeState::Completed {
            status: Some(Status::Ok),
            dispatched: 0
        })
    );
    assert!(logger.has_error("probe exploded"));
}

#[test]
fn validator_without_collector_sees_absent_data() {
    let log = events();
    let mut ctx = context();
    ctx.registry_mut().register_validator(
        "v",
        RecordingValidator {
            id: "v",
            events: log.clone(),
        },
    );

    let report = Executor::new().execute(&ctx).unwrap().unwrap();
    assert_eq!(
        report.get("v"),
        Some(&OutcomeState::Completed {
            status: Some(Status::NotFound),
            dispatched: 0
        })
    );
}

#[test]
fn reactor_without_validator_still_reacts_and_dispatches() {
    let log = events();
    let mut ctx = context();
    ctx.registry_mut().register_reactor(
        "r",
        RecordingReactor {
            id: "r",
            events: log.clone(),
            commands: 2,
        },
    );

    let report = Executor::new()
        .execute_with(&ctx, |_| {
            Box::new(RecordingHandler {
                events: log.clone(),
                fail: false,
            })
        })
        .unwrap()
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["react:r", "dispatch:fix r-0", "dispatch:fix r-1"]
    );
    assert_eq!(
        report.get("r"),
        Some(&OutcomeState::Completed {
            status: None,
            dispatched: 2
        })
    );
}

struct FailingValidator;

impl Validator for FailingValidator {
    fn validate(&self, _data: Option<Data>, _ctx: &Context) -> Result<ValidationResult> {
        Err(InspectorError::validation("a", "echoed the wrong data"))
    }
}

struct FailingReactor;

impl Reactor for FailingReactor {
    fn react(&self, _result: &ValidationResult, _ctx: &Context) -> Result<Vec<ReactorCommand>> {
        Err(InspectorError::reaction("a", "cannot build command"))
    }
}

fn run_with_recording_handler(ctx: &Context, log: &Events) -> inspector::api::ExecutionReport {
    Executor::new()
        .execute_with(ctx, |_| {
            Box::new(RecordingHandler {
                events: log.clone(),
                fail: false,
            })
        })
        .unwrap()
        .unwrap()
}

#[test]
fn failing_validator_is_contained_and_next_component_runs() {
    let log = events();
    let mut ctx = context();
    ctx.registry_mut().register_collector(
        "a",
        RecordingCollector {
            id: "a",
            events: log.clone(),
            fail: false,
        },
    );
    ctx.registry_mut().register_validator("a", FailingValidator);
    ctx.registry_mut().register_reactor(
        "a",
        RecordingReactor {
            id: "a",
            events: log.clone(),
            commands: 1,
        },
    );
    register_full(&mut ctx, "b", &log, 1);

    let report = run_with_recording_handler(&ctx, &log);

    assert!(matches!(
        report.get("a"),
        Some(OutcomeState::Failed {
            stage: Stage::Validate,
            ..
        })
    ));
    assert_eq!(
        *log.borrow(),
        vec!["collect:a", "collect:b", "validate:b", "react:b", "dispatch:fix b-0"]
    );
    assert_eq!(
        report.get("b"),
        Some(&OutcomeState::Completed {
            status: Some(Status::Ok),
            dispatched: 1
        })
    );
}

#[test]
fn failing_reactor_is_contained_and_next_component_runs() {
    let log = events();
    let mut ctx = context();
    ctx.registry_mut().register_collector(
        "a",
        RecordingCollector {
            id: "a",
            events: log.clone(),
            fail: false,
        },
    );
    ctx.registry_mut().register_validator(
        "a",
        RecordingValidator {
            id: "a",
            events: log.clone(),
        },
    );
    ctx.registry_mut().register_reactor("a", FailingReactor);
    register_full(&mut ctx, "b", &log, 1);

    let report = run_with_recording_handler(&ctx, &log);

    assert!(matches!(
        report.get("a"),
        Some(OutcomeState::Failed {
            stage: Stage::React,
            ..
        })
    ));
    assert_eq!(
        *log.borrow(),
        vec![
            "collect:a",
            "validate:a",
            "collect:b",
            "validate:b",
            "react:b",
            "dispatch:fix b-0"
        ]
    );
    assert_eq!(report.dispatched(), 1);
}
