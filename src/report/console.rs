//! Human-readable report on the console.

use std::io::{self, IsTerminal, Write};

use yacu_core::{Status, Suite, TestContext};

use super::Reporter;
use crate::error::HarnessResult;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Prints one line per suite, one line per test, and the diagnostic of every failed test.
///
/// ```text
/// Math
///   addOk: OK
///   addBad: TEST_FAILURE
///     Condition 2 + 3 == 6 (5 == 6) failed at (src/main.rs:9)
///
/// 2 tests: 1 passed, 1 failed, 0 errors
/// ```
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    color: bool,
    passed: usize,
    failed: usize,
    errors: usize,
}

impl ConsoleReporter<io::Stdout> {
    /// Report to stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal();
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            passed: 0,
            failed: 0,
            errors: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn status_color(status: Status) -> &'static str {
        match status {
            Status::Ok => GREEN,
            Status::TestFailure => RED,
            _ => YELLOW,
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_suite_started(&mut self, suite: &Suite) -> HarnessResult<()> {
        let line = self.paint(suite.name(), BOLD);
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn on_test_finished(&mut self, ctx: &TestContext<'_>) -> HarnessResult<()> {
        let status = ctx.result();
        match status {
            Status::Ok => self.passed += 1,
            Status::TestFailure => self.failed += 1,
            _ => self.errors += 1,
        }

        let label = self.paint(status.as_str(), Self::status_color(status));
        writeln!(self.out, "  {}: {}", ctx.test().name(), label)?;
        for line in ctx.message().lines() {
            writeln!(self.out, "    {}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn on_suites_finished(&mut self) -> HarnessResult<()> {
        let total = self.passed + self.failed + self.errors;
        let noun = if total == 1 { "test" } else { "tests" };
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} {}: {} passed, {} failed, {} errors",
            total, noun, self.passed, self.failed, self.errors
        )?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use yacu_core::{TestCase, TestOutcome};

    use super::*;

    fn noop(_ctx: &mut TestContext<'_>) -> TestOutcome {
        Ok(())
    }

    const TESTS: &[TestCase] = &[
        TestCase::new("addOk", noop),
        TestCase::new("addBad", noop),
        TestCase::new("crash", noop),
    ];
    static SUITE: Suite = Suite::new("Math", TESTS);

    fn render(color: bool) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new(), color);
        reporter.on_suites_started().unwrap();
        reporter.on_suite_started(&SUITE).unwrap();

        let ok = TestContext::new(&SUITE, &TESTS[0], true);
        reporter.on_test_finished(&ok).unwrap();

        let mut bad = TestContext::new(&SUITE, &TESTS[1], true);
        let _ = bad.fail("Condition 2 + 3 == 6 (5 == 6) failed at (src/main.rs:9)");
        reporter.on_test_finished(&bad).unwrap();

        let mut crash = TestContext::new(&SUITE, &TESTS[2], true);
        crash.record(Status::TestError);
        crash.append_message("terminated by signal 11");
        reporter.on_test_finished(&crash).unwrap();

        reporter.on_suite_finished(&SUITE).unwrap();
        reporter.on_suites_finished().unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_rendering() {
        insta::assert_snapshot!(render(false), @r"
        Math
          addOk: OK
          addBad: TEST_FAILURE
            Condition 2 + 3 == 6 (5 == 6) failed at (src/main.rs:9)
          crash: TEST_ERROR
            terminated by signal 11

        3 tests: 1 passed, 1 failed, 1 errors
        ");
    }

    #[test]
    fn test_colored_rendering_wraps_statuses() {
        let output = render(true);
        assert!(output.contains("\x1b[32mOK\x1b[0m"));
        assert!(output.contains("\x1b[31mTEST_FAILURE\x1b[0m"));
        assert!(output.contains("\x1b[1mMath\x1b[0m"));
    }

    #[test]
    fn test_empty_run_summary() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false);
        reporter.on_suites_started().unwrap();
        reporter.on_suites_finished().unwrap();
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output, "\n0 tests: 0 passed, 0 failed, 0 errors\n");
    }
}
