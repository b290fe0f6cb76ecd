//! Child side of the isolation message channel.
//!
//! An isolated test runs in its own process, so its [`TestContext`] dies with it. This sink, the only
//! one registered in the child, writes the diagnostic message to a file the parent reads back once
//! the child has exited.

use std::fs;
use std::path::PathBuf;

use yacu_core::TestContext;

use super::Reporter;
use crate::error::{HarnessError, HarnessResult};

pub struct MessageFileReporter {
    path: PathBuf,
}

impl MessageFileReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Reporter for MessageFileReporter {
    fn on_test_finished(&mut self, ctx: &TestContext<'_>) -> HarnessResult<()> {
        fs::write(&self.path, ctx.message()).map_err(|e| HarnessError::file(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use yacu_core::{Status, Suite, TestCase, TestOutcome};

    use super::*;

    fn noop(_ctx: &mut TestContext<'_>) -> TestOutcome {
        Ok(())
    }

    const TESTS: &[TestCase] = &[TestCase::new("t", noop)];
    static SUITE: Suite = Suite::new("S", TESTS);

    #[test]
    fn test_writes_message_of_finished_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message");
        let mut reporter = MessageFileReporter::new(&path);

        let mut ctx = TestContext::new(&SUITE, &TESTS[0], false);
        let _ = ctx.fail("Condition x failed at (a.rs:1)");
        reporter.on_test_finished(&ctx).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Condition x failed at (a.rs:1)");
    }

    #[test]
    fn test_unwritable_path_is_a_file_fault() {
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = MessageFileReporter::new(dir.path().join("missing").join("message"));
        let ctx = TestContext::new(&SUITE, &TESTS[0], false);
        let err = reporter.on_test_finished(&ctx).unwrap_err();
        assert_eq!(err.status(), Status::FileFail);
    }
}
