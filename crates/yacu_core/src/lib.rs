//! Provide the shared, pure vocabulary of the yacu test harness.
//!
//! This crate is intentionally small and dependency-free. It contains the pieces a test author touches
//! directly and that every harness component agrees on:
//! - [`Status`], the severity-ordered outcome of a test or a whole run,
//! - [`Suite`] and [`TestCase`], the statically declared test table,
//! - [`TestContext`], the per-execution state a test body writes its verdict into,
//! - the `yacu_assert*` macro family built on [`TestContext::fail`].
//!
//! ## Notes
//!
//! - No IO, no global state, no process handling. Running tests lives in the `yacu` crate.
//! - A test body returns [`TestOutcome`]; assertions abort the body with an early `return Err(..)`.

#![forbid(unsafe_code)]

pub mod assert;
pub mod context;
pub mod model;
pub mod status;

pub use assert::{AssertionFailure, TestOutcome};
pub use context::{MESSAGE_CAPACITY, MessageBuffer, TestContext};
pub use model::{RunFilter, Suite, TestCase, TestFn};
pub use status::Status;
