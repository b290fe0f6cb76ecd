//! Shared fixtures for the engine-level integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use yacu::runner::TestExecutor;
use yacu::{HarnessError, HarnessResult, Reporter, Status, Suite, TestCase, TestContext, TestOutcome};

/// Reporter that logs every event as a compact line.
pub struct Recorder {
    log: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }

    fn push(&self, line: String) {
        self.log.borrow_mut().push(line);
    }
}

impl Reporter for Recorder {
    fn on_suites_started(&mut self) -> HarnessResult<()> {
        self.push("suites_started".to_string());
        Ok(())
    }

    fn on_suite_started(&mut self, suite: &Suite) -> HarnessResult<()> {
        self.push(format!("suite_started {}", suite.name()));
        Ok(())
    }

    fn on_test_started(&mut self, suite: &Suite, test: &TestCase) -> HarnessResult<()> {
        self.push(format!("test_started {}/{}", suite.name(), test.name()));
        Ok(())
    }

    fn on_test_finished(&mut self, ctx: &TestContext<'_>) -> HarnessResult<()> {
        self.push(format!("test_finished {}/{} {}", ctx.suite().name(), ctx.test().name(), ctx.result()));
        Ok(())
    }

    fn on_suite_finished(&mut self, suite: &Suite) -> HarnessResult<()> {
        self.push(format!("suite_finished {}", suite.name()));
        Ok(())
    }

    fn on_suites_finished(&mut self) -> HarnessResult<()> {
        self.push("suites_finished".to_string());
        Ok(())
    }
}

/// Executor that hands out a fixed verdict per test name instead of running bodies.
#[derive(Default)]
pub struct ScriptedExecutor {
    verdicts: HashMap<String, Status>,
    fault_on: Option<String>,
}

impl ScriptedExecutor {
    pub fn verdict(mut self, test: &str, status: Status) -> Self {
        self.verdicts.insert(test.to_string(), status);
        self
    }

    /// Fail with a spawn error when asked to run `test`.
    pub fn fault_on(mut self, test: &str) -> Self {
        self.fault_on = Some(test.to_string());
        self
    }
}

impl TestExecutor for ScriptedExecutor {
    fn execute(&self, ctx: &mut TestContext<'_>) -> HarnessResult<Status> {
        let name = ctx.test().name();
        if self.fault_on.as_deref() == Some(name) {
            return Err(HarnessError::Spawn {
                program: "scripted".into(),
                source: std::io::Error::other("no processes left"),
            });
        }
        ctx.record(self.verdicts.get(name).copied().unwrap_or(Status::Ok));
        Ok(ctx.result())
    }
}

pub fn noop(_ctx: &mut TestContext<'_>) -> TestOutcome {
    Ok(())
}

/// Build a suite table at runtime; names and tables live for the rest of the test process.
pub fn leak_suites(layout: &[(String, Vec<String>)]) -> &'static [Suite] {
    let suites: Vec<Suite> = layout
        .iter()
        .map(|(suite, tests)| {
            let cases: Vec<TestCase> = tests
                .iter()
                .map(|test| TestCase::new(test.clone().leak(), noop))
                .collect();
            Suite::new(suite.clone().leak(), cases.leak())
        })
        .collect();
    suites.leak()
}
