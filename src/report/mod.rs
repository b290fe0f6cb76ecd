//! Report sinks and the dispatcher that fans lifecycle events out to them.
//!
//! ## Reporter Trait
//!
//! Every sink implements [`Reporter`], one method per lifecycle event. Within a run the events
//! arrive in exactly this shape:
//!
//! ```text
//! SuitesStarted (SuiteStarted (TestStarted TestFinished)* SuiteFinished)* SuitesFinished
//! ```
//!
//! The [`TestContext`] handed to `on_test_finished` is only valid for the duration of the call.
//! A sink that cannot write its artifact returns a [`HarnessError`], which ends the run.

pub mod console;
pub mod junit;
pub mod message_file;

use yacu_core::{Suite, TestCase, TestContext};

use crate::error::HarnessResult;

pub use console::ConsoleReporter;
pub use junit::JUnitReporter;
pub use message_file::MessageFileReporter;

/// Observer of a test run.
///
/// All methods default to doing nothing, so a sink only implements the events it cares about.
pub trait Reporter {
    /// Called once before the first suite.
    fn on_suites_started(&mut self) -> HarnessResult<()> {
        Ok(())
    }

    /// Called when a suite matching the filter is entered.
    fn on_suite_started(&mut self, _suite: &Suite) -> HarnessResult<()> {
        Ok(())
    }

    /// Called right before a test body runs.
    fn on_test_started(&mut self, _suite: &Suite, _test: &TestCase) -> HarnessResult<()> {
        Ok(())
    }

    /// Called with the final verdict of a test.
    fn on_test_finished(&mut self, _ctx: &TestContext<'_>) -> HarnessResult<()> {
        Ok(())
    }

    /// Called after the last selected test of a suite, even if none was selected.
    fn on_suite_finished(&mut self, _suite: &Suite) -> HarnessResult<()> {
        Ok(())
    }

    /// Called once after the last suite.
    fn on_suites_finished(&mut self) -> HarnessResult<()> {
        Ok(())
    }
}

/// A lifecycle event, as broadcast by [`ReportDispatcher::notify`].
#[derive(Debug, Clone, Copy)]
pub enum ReportEvent<'e, 'a> {
    SuitesStarted,
    SuiteStarted(&'e Suite),
    TestStarted(&'e Suite, &'e TestCase),
    TestFinished(&'e TestContext<'a>),
    SuiteFinished(&'e Suite),
    SuitesFinished,
}

/// Ordered set of sinks receiving every event of a run.
#[derive(Default)]
pub struct ReportDispatcher {
    sinks: Vec<Box<dyn Reporter>>,
}

impl ReportDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink; sinks are notified in registration order.
    pub fn push(&mut self, sink: Box<dyn Reporter>) {
        self.sinks.push(sink);
    }

    pub fn with(mut self, sink: impl Reporter + 'static) -> Self {
        self.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Broadcast `event` to every sink. The first sink failure aborts the broadcast.
    pub fn notify(&mut self, event: ReportEvent<'_, '_>) -> HarnessResult<()> {
        for sink in &mut self.sinks {
            match event {
                ReportEvent::SuitesStarted => sink.on_suites_started()?,
                ReportEvent::SuiteStarted(suite) => sink.on_suite_started(suite)?,
                ReportEvent::TestStarted(suite, test) => sink.on_test_started(suite, test)?,
                ReportEvent::TestFinished(ctx) => sink.on_test_finished(ctx)?,
                ReportEvent::SuiteFinished(suite) => sink.on_suite_finished(suite)?,
                ReportEvent::SuitesFinished => sink.on_suites_finished()?,
            }
        }
        Ok(())
    }
}
