//! Per-execution test state.

use std::fmt;

use crate::assert::AssertionFailure;
use crate::model::{Suite, TestCase};
use crate::status::Status;

/// Capacity of a test's diagnostic message, in bytes.
pub const MESSAGE_CAPACITY: usize = 100_000;

/// Append-only text buffer with a fixed byte capacity.
///
/// Text beyond the capacity is dropped; truncation always lands on a UTF-8 character boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBuffer {
    text: String,
    capacity: usize,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MESSAGE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::new(),
            capacity,
        }
    }

    /// Append as much of `text` as fits. Returns `false` when anything was dropped.
    pub fn append(&mut self, text: &str) -> bool {
        let room = self.capacity.saturating_sub(self.text.len());
        if text.len() <= room {
            self.text.push_str(text);
            return true;
        }
        let mut end = room;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&text[..end]);
        false
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Mutable state of one test execution.
///
/// Created by the runner right before the body is invoked and never shared between tests. Report
/// sinks only ever see it by shared reference.
#[derive(Debug)]
pub struct TestContext<'a> {
    suite: &'a Suite,
    test: &'a TestCase,
    isolated: bool,
    result: Status,
    message: MessageBuffer,
}

impl<'a> TestContext<'a> {
    pub fn new(suite: &'a Suite, test: &'a TestCase, isolated: bool) -> Self {
        Self {
            suite,
            test,
            isolated,
            result: Status::Ok,
            message: MessageBuffer::new(),
        }
    }

    pub fn suite(&self) -> &'a Suite {
        self.suite
    }

    pub fn test(&self) -> &'a TestCase {
        self.test
    }

    /// Whether the test runs in a process of its own.
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn result(&self) -> Status {
        self.result
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Record a verdict. A verdict never downgrades: the most severe one recorded wins.
    pub fn record(&mut self, status: Status) {
        self.result = self.result.worst(status);
    }

    /// Append diagnostic text, truncated to [`MESSAGE_CAPACITY`].
    pub fn append_message(&mut self, text: &str) {
        self.message.append(text);
    }

    /// Fail the test with `message` and hand back the token that aborts the body.
    ///
    /// Only the first failure is recorded; a later call leaves result and message untouched.
    pub fn fail(&mut self, message: impl AsRef<str>) -> AssertionFailure {
        if self.result.is_ok() {
            self.result = Status::TestFailure;
            self.message.append(message.as_ref());
        }
        AssertionFailure::new()
    }
}
