#![forbid(unsafe_code)]
//! yacu: a unit-test harness for ordinary binaries.
//!
//! Tests are plain functions grouped into statically declared suites. The harness runs them one per
//! child process (or in-process with `--no-fork`), reports every verdict to the console and optionally
//! to a JUnit XML file, and exits with the worst status of the run.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test bodies**: assertions return `Err` instead of panicking. A panic in a test body is still
//!   contained and reported as `TEST_ERROR`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod error;
pub mod report;
pub mod runner;

pub use yacu_core::{
    AssertionFailure, MESSAGE_CAPACITY, MessageBuffer, RunFilter, Status, Suite, TestCase, TestContext, TestFn,
    TestOutcome,
};
pub use yacu_core::{
    yacu_assert, yacu_assert_approx_eq, yacu_assert_cmp, yacu_assert_eq, yacu_assert_ge, yacu_assert_gt,
    yacu_assert_le, yacu_assert_lt, yacu_assert_ne, yacu_fail,
};

pub use error::{HarnessError, HarnessResult};
pub use report::{ReportDispatcher, ReportEvent, Reporter};
pub use runner::{Action, RunOptions, RunOutcome};
