//! Test execution boundary.
//!
//! A [`TestExecutor`] runs one test and records its verdict in the test's [`TestContext`]:
//! - [`InProcessExecutor`] calls the body directly, containing assertion failures and panics,
//! - [`SubprocessExecutor`] re-runs the current binary for exactly that test and decodes how the
//!   child process ended.
//!
//! The child is started as `<program> --no-fork --child-message <file> --test <suite> <test>`; it
//! exits with the code of its [`Status`] and leaves the diagnostic message in `<file>`.

use std::any::Any;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use yacu_core::{Status, Suite, TestCase, TestContext};

use crate::error::{HarnessError, HarnessResult};

/// Hidden flag that turns a harness invocation into an isolated child.
pub const CHILD_MESSAGE_FLAG: &str = "--child-message";

/// Run a compiled test and capture its verdict.
pub trait TestExecutor {
    /// Run the test described by `ctx`, record the verdict in `ctx`, and return it.
    ///
    /// Test failures and crashes are verdicts, not errors. An `Err` is a harness fault that ends
    /// the run.
    fn execute(&self, ctx: &mut TestContext<'_>) -> HarnessResult<Status>;

    /// Whether tests run in a process of their own.
    fn is_isolated(&self) -> bool {
        false
    }
}

/// Create the context for one execution of `test` and run it.
pub fn run_test<'a>(
    executor: &dyn TestExecutor,
    suite: &'a Suite,
    test: &'a TestCase,
) -> HarnessResult<TestContext<'a>> {
    let mut ctx = TestContext::new(suite, test, executor.is_isolated());
    executor.execute(&mut ctx)?;
    Ok(ctx)
}

// ============================================================================
// In-process execution
// ============================================================================

/// Runs test bodies on the harness's own thread.
///
/// A failed assertion ends only the failing body. A panic is caught and reported as
/// [`Status::TestError`]. A body that exits the process takes the harness down with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct InProcessExecutor;

impl TestExecutor for InProcessExecutor {
    fn execute(&self, ctx: &mut TestContext<'_>) -> HarnessResult<Status> {
        let body = ctx.test().body();
        match panic::catch_unwind(AssertUnwindSafe(|| body(ctx))) {
            Ok(Ok(())) => {}
            // The failure is already recorded in `ctx`.
            Ok(Err(_failure)) => {}
            Err(payload) => {
                ctx.record(Status::TestError);
                ctx.append_message(&format!("test panicked: {}", panic_message(payload.as_ref())));
            }
        }
        Ok(ctx.result())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

// ============================================================================
// Subprocess execution
// ============================================================================

/// Runs every test in a fresh child process of `program`.
#[derive(Debug, Clone)]
pub struct SubprocessExecutor {
    program: PathBuf,
}

impl SubprocessExecutor {
    /// Spawn children of `program`, which must declare the same suites as the parent.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Spawn children of the currently running executable.
    pub fn current_exe() -> HarnessResult<Self> {
        env::current_exe().map(Self::new).map_err(HarnessError::CurrentExe)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl TestExecutor for SubprocessExecutor {
    fn execute(&self, ctx: &mut TestContext<'_>) -> HarnessResult<Status> {
        // Anything still buffered would otherwise show up after the child's own output.
        io::stdout().flush()?;
        io::stderr().flush()?;

        let channel = tempfile::Builder::new()
            .prefix("yacu-message-")
            .tempfile()
            .map_err(|e| HarnessError::file(env::temp_dir(), e))?;

        let suite = ctx.suite().name();
        let test = ctx.test().name();
        tracing::debug!(program = %self.program.display(), suite, test, "spawning isolated test");

        let exit = Command::new(&self.program)
            .arg("--no-fork")
            .arg(CHILD_MESSAGE_FLAG)
            .arg(channel.path())
            .arg("--test")
            .arg(suite)
            .arg(test)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| HarnessError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let decoded = decode_exit_status(exit);
        match fs::read_to_string(channel.path()) {
            Ok(message) => ctx.append_message(&message),
            Err(e) => tracing::warn!(suite, test, error = %e, "cannot read message of isolated test"),
        }
        if ctx.message().is_empty() {
            if let Some(description) = &decoded.description {
                ctx.append_message(description);
            }
        }
        ctx.record(decoded.status);
        Ok(ctx.result())
    }

    fn is_isolated(&self) -> bool {
        true
    }
}

/// How a test process ended, as a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExit {
    pub status: Status,
    /// Set when the process ended in a way the test itself could not have reported.
    pub description: Option<String>,
}

impl DecodedExit {
    fn anomaly(description: String) -> Self {
        Self {
            status: Status::TestError,
            description: Some(description),
        }
    }
}

/// Classify the exit status of a test process.
///
/// A known status code is taken as is. Unknown codes, signals, and job-control stops all become
/// [`Status::TestError`].
pub fn decode_exit_status(exit: ExitStatus) -> DecodedExit {
    if let Some(code) = exit.code() {
        if Status::from_code(code).is_some() {
            return DecodedExit {
                status: Status::from_exit_code(code),
                description: None,
            };
        }
        return DecodedExit::anomaly(format!("test process exited with unexpected code {code}"));
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = exit.signal() {
            tracing::warn!(signal, core_dumped = exit.core_dumped(), "test process killed by signal");
            let core = if exit.core_dumped() { " (core dumped)" } else { "" };
            return DecodedExit::anomaly(format!("test process terminated by signal {signal}{core}"));
        }
        if let Some(signal) = exit.stopped_signal() {
            tracing::warn!(signal, "test process stopped");
            return DecodedExit::anomaly(format!("test process stopped by signal {signal}"));
        }
        if exit.continued() {
            tracing::warn!("test process continued");
            return DecodedExit::anomaly("test process was continued unexpectedly".to_string());
        }
    }

    DecodedExit::anomaly("test process ended abnormally".to_string())
}

#[cfg(test)]
mod tests {
    use yacu_core::{TestOutcome, yacu_assert_eq, yacu_fail};

    use super::*;

    fn passes(ctx: &mut TestContext<'_>) -> TestOutcome {
        yacu_assert_eq!(ctx, 1 + 1, 2);
        Ok(())
    }

    fn fails(ctx: &mut TestContext<'_>) -> TestOutcome {
        yacu_assert_eq!(ctx, 1 + 1, 3);
        Ok(())
    }

    fn panics(_ctx: &mut TestContext<'_>) -> TestOutcome {
        panic!("boom");
    }

    fn panics_with_string(_ctx: &mut TestContext<'_>) -> TestOutcome {
        let code = 7;
        panic!("boom {code}");
    }

    fn errors_then_fails(ctx: &mut TestContext<'_>) -> TestOutcome {
        ctx.record(Status::TestError);
        yacu_fail!(ctx, "after an error");
    }

    const TESTS: &[TestCase] = &[
        TestCase::new("passes", passes),
        TestCase::new("fails", fails),
        TestCase::new("panics", panics),
        TestCase::new("panicsWithString", panics_with_string),
        TestCase::new("errorsThenFails", errors_then_fails),
    ];
    static SUITE: Suite = Suite::new("InProcess", TESTS);

    fn run_in_process(index: usize) -> TestContext<'static> {
        run_test(&InProcessExecutor, &SUITE, &TESTS[index]).unwrap()
    }

    #[test]
    fn test_in_process_verdicts() {
        let ok = run_in_process(0);
        assert_eq!(ok.result(), Status::Ok);
        assert!(ok.message().is_empty());
        assert!(!ok.is_isolated());

        let failed = run_in_process(1);
        assert_eq!(failed.result(), Status::TestFailure);
        assert!(failed.message().starts_with("Condition 1 + 1 == 3 (2 == 3)"));
    }

    #[test]
    fn test_in_process_panic_is_contained() {
        let panicked = run_in_process(2);
        assert_eq!(panicked.result(), Status::TestError);
        assert_eq!(panicked.message(), "test panicked: boom");

        let formatted = run_in_process(3);
        assert_eq!(formatted.message(), "test panicked: boom 7");
    }

    #[test]
    fn test_failure_after_recorded_error_keeps_the_error() {
        let ctx = run_in_process(4);
        assert_eq!(ctx.result(), Status::TestError);
        assert!(ctx.message().is_empty());
    }

    #[test]
    fn test_spawn_failure_is_fork_fail() {
        let executor = SubprocessExecutor::new("/nonexistent/yacu-test-binary");
        let err = run_test(&executor, &SUITE, &TESTS[0]).unwrap_err();
        assert_eq!(err.status(), Status::ForkFail);
    }

    #[cfg(unix)]
    mod unix {
        use std::os::unix::process::ExitStatusExt;

        use super::*;

        fn decode(raw: i32) -> DecodedExit {
            decode_exit_status(ExitStatus::from_raw(raw))
        }

        #[test]
        fn test_known_exit_codes_are_taken_as_is() {
            assert_eq!(decode(0).status, Status::Ok);
            assert_eq!(decode(1 << 8).status, Status::TestFailure);
            assert_eq!(decode(5 << 8).status, Status::TestError);
            assert_eq!(decode(4 << 8).status, Status::FileFail);
            assert_eq!(decode(1 << 8).description, None);
        }

        #[test]
        fn test_unknown_exit_code_is_error() {
            let decoded = decode(42 << 8);
            assert_eq!(decoded.status, Status::TestError);
            assert_eq!(decoded.description.as_deref(), Some("test process exited with unexpected code 42"));
        }

        #[test]
        fn test_signal_is_error() {
            let decoded = decode(11);
            assert_eq!(decoded.status, Status::TestError);
            assert_eq!(decoded.description.as_deref(), Some("test process terminated by signal 11"));
        }

        #[test]
        fn test_stop_and_continue_are_errors() {
            // WIFSTOPPED with SIGSTOP (19).
            let stopped = decode((19 << 8) | 0x7f);
            assert_eq!(stopped.status, Status::TestError);
            assert_eq!(stopped.description.as_deref(), Some("test process stopped by signal 19"));

            let continued = decode(0xffff);
            assert_eq!(continued.status, Status::TestError);
        }
    }
}
