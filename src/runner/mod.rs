//! Execution engine.
//!
//! Walks the declared suites in order, runs every test the filter selects through a
//! [`TestExecutor`], broadcasts the lifecycle events, and folds the verdicts into a [`RunOutcome`].

pub mod executor;

use std::io::Write;
use std::path::PathBuf;

use yacu_core::{RunFilter, Status, Suite};

use crate::error::HarnessResult;
use crate::report::{ReportDispatcher, ReportEvent};

pub use executor::{
    CHILD_MESSAGE_FLAG, DecodedExit, InProcessExecutor, SubprocessExecutor, TestExecutor, decode_exit_status,
    run_test,
};

/// What a harness invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    Help,
    List,
    #[default]
    Run,
}

/// Fully resolved configuration of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub action: Action,
    pub filter: RunFilter,
    /// Run every test in its own process.
    pub isolate: bool,
    pub junit_path: Option<PathBuf>,
    pub console: bool,
    /// Set in an isolated child: where to leave the message of the single test it runs.
    pub child_message: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            action: Action::Run,
            filter: RunFilter::all(),
            isolate: true,
            junit_path: None,
            console: true,
            child_message: None,
        }
    }
}

/// Aggregate verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOutcome {
    /// Worst status of all executed tests, `Ok` when none ran.
    pub status: Status,
    pub executed: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl RunOutcome {
    pub fn record(&mut self, status: Status) {
        self.status = self.status.worst(status);
        self.executed += 1;
        match status {
            Status::Ok => self.passed += 1,
            Status::TestFailure => self.failed += 1,
            _ => self.errored += 1,
        }
    }
}

/// Carry out `options.action` against `suites`.
///
/// `out` receives the listing and the usage text. Test reports only go through `dispatcher`.
pub fn execute(
    options: &RunOptions,
    suites: &[Suite],
    dispatcher: &mut ReportDispatcher,
    out: &mut dyn Write,
) -> HarnessResult<RunOutcome> {
    match options.action {
        Action::Help => {
            write!(out, "{}", crate::cli::usage())?;
            out.flush()?;
            Ok(RunOutcome::default())
        }
        Action::List => {
            list_suites(suites, out)?;
            Ok(RunOutcome::default())
        }
        Action::Run => {
            if options.isolate {
                let executor = SubprocessExecutor::current_exe()?;
                run_suites(&options.filter, suites, dispatcher, &executor)
            } else {
                run_suites(&options.filter, suites, dispatcher, &InProcessExecutor)
            }
        }
    }
}

/// Run every selected test of `suites`, in declaration order.
///
/// A suite that matches the filter is always announced and finished, even when none of its tests
/// is selected. A harness error stops the traversal immediately.
#[tracing::instrument(skip_all, fields(suites = suites.len(), isolated = executor.is_isolated()))]
pub fn run_suites(
    filter: &RunFilter,
    suites: &[Suite],
    dispatcher: &mut ReportDispatcher,
    executor: &dyn TestExecutor,
) -> HarnessResult<RunOutcome> {
    let mut outcome = RunOutcome::default();
    dispatcher.notify(ReportEvent::SuitesStarted)?;

    for suite in suites.iter().filter(|suite| filter.matches_suite(suite)) {
        dispatcher.notify(ReportEvent::SuiteStarted(suite))?;
        for test in suite.tests().iter().filter(|test| filter.matches_test(test)) {
            dispatcher.notify(ReportEvent::TestStarted(suite, test))?;
            let ctx = run_test(executor, suite, test)?;
            tracing::debug!(suite = suite.name(), test = test.name(), status = %ctx.result(), "test finished");
            outcome.record(ctx.result());
            dispatcher.notify(ReportEvent::TestFinished(&ctx))?;
        }
        dispatcher.notify(ReportEvent::SuiteFinished(suite))?;
    }

    dispatcher.notify(ReportEvent::SuitesFinished)?;
    Ok(outcome)
}

/// Print every suite followed by its tests, one `- name` line each.
pub fn list_suites(suites: &[Suite], out: &mut dyn Write) -> HarnessResult<()> {
    for suite in suites {
        writeln!(out, "{}", suite.name())?;
        for test in suite.tests() {
            writeln!(out, "- {}", test.name())?;
        }
    }
    out.flush()?;
    Ok(())
}
