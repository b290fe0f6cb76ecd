//! JUnit XML report.
//!
//! The document is accumulated in memory and written in one go when the run finishes, so the file is
//! opened once per run and always ends up syntactically complete, even when no test ran.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use yacu_core::{Status, Suite, TestContext};

use super::Reporter;
use crate::error::{HarnessError, HarnessResult};

/// Buffered `<testsuite>` element; its counters are only known once the suite finishes.
#[derive(Default)]
struct SuiteBuffer {
    name: String,
    cases: String,
    tests: usize,
    failures: usize,
    errors: usize,
}

pub struct JUnitReporter<W: Write = BufWriter<File>> {
    out: W,
    /// Where `out` points, for error messages.
    path: PathBuf,
    document: String,
    suite: Option<SuiteBuffer>,
    tests: usize,
    failures: usize,
    errors: usize,
    written: bool,
}

impl JUnitReporter {
    /// Create (truncate) the report file. Failing here aborts the run before any test executes.
    pub fn create(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| HarnessError::file(path, e))?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<W: Write> JUnitReporter<W> {
    pub fn new(out: W, path: impl Into<PathBuf>) -> Self {
        Self {
            out,
            path: path.into(),
            document: String::new(),
            suite: None,
            tests: 0,
            failures: 0,
            errors: 0,
            written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <testsuites tests=\"{}\" failures=\"{}\" errors=\"{}\">\n{}</testsuites>\n",
            self.tests, self.failures, self.errors, self.document
        )
    }
}

impl<W: Write> Reporter for JUnitReporter<W> {
    fn on_suite_started(&mut self, suite: &Suite) -> HarnessResult<()> {
        self.suite = Some(SuiteBuffer {
            name: suite.name().to_string(),
            ..SuiteBuffer::default()
        });
        Ok(())
    }

    fn on_test_finished(&mut self, ctx: &TestContext<'_>) -> HarnessResult<()> {
        let suite = self.suite.get_or_insert_with(|| SuiteBuffer {
            name: ctx.suite().name().to_string(),
            ..SuiteBuffer::default()
        });
        suite.tests += 1;

        let name = escape(ctx.test().name());
        let classname = escape(ctx.suite().name());
        let status = ctx.result();
        if status.is_ok() {
            suite
                .cases
                .push_str(&format!("    <testcase name=\"{name}\" classname=\"{classname}\"/>\n"));
            return Ok(());
        }

        let element = if status == Status::TestFailure {
            suite.failures += 1;
            "failure"
        } else {
            suite.errors += 1;
            "error"
        };
        let summary = escape(ctx.message().lines().next().unwrap_or(status.as_str()));
        suite.cases.push_str(&format!(
            "    <testcase name=\"{name}\" classname=\"{classname}\">\n      \
             <{element} message=\"{summary}\" type=\"{status}\">{}</{element}>\n    \
             </testcase>\n",
            escape(ctx.message()),
        ));
        Ok(())
    }

    fn on_suite_finished(&mut self, suite: &Suite) -> HarnessResult<()> {
        let buffer = self.suite.take().unwrap_or_else(|| SuiteBuffer {
            name: suite.name().to_string(),
            ..SuiteBuffer::default()
        });
        self.tests += buffer.tests;
        self.failures += buffer.failures;
        self.errors += buffer.errors;

        let name = escape(&buffer.name);
        if buffer.tests == 0 {
            self.document
                .push_str(&format!("  <testsuite name=\"{name}\" tests=\"0\" failures=\"0\" errors=\"0\"/>\n"));
        } else {
            self.document.push_str(&format!(
                "  <testsuite name=\"{name}\" tests=\"{}\" failures=\"{}\" errors=\"{}\">\n{}  </testsuite>\n",
                buffer.tests, buffer.failures, buffer.errors, buffer.cases
            ));
        }
        Ok(())
    }

    fn on_suites_finished(&mut self) -> HarnessResult<()> {
        if self.written {
            return Ok(());
        }
        let document = self.render();
        self.out
            .write_all(document.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| HarnessError::file(&self.path, e))?;
        self.written = true;
        tracing::debug!(path = %self.path.display(), bytes = document.len(), "wrote JUnit report");
        Ok(())
    }
}

/// Escape text for use in XML attributes and character data.
///
/// Control characters other than tab, newline and carriage return are not allowed in XML 1.0 and
/// become U+FFFD.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(ch),
            _ if ch.is_ascii_control() => escaped.push(char::REPLACEMENT_CHARACTER),
            _ => escaped.push(ch),
        }
    }
    escaped
}
