//! The declared test table and the filter applied to it.

use crate::assert::TestOutcome;
use crate::context::TestContext;

/// Signature of a test body.
pub type TestFn = fn(&mut TestContext<'_>) -> TestOutcome;

/// A named unit of verification logic.
#[derive(Clone, Copy)]
pub struct TestCase {
    name: &'static str,
    body: TestFn,
}

impl TestCase {
    pub const fn new(name: &'static str, body: TestFn) -> Self {
        Self { name, body }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn body(&self) -> TestFn {
        self.body
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A named, ordered group of test cases.
///
/// ```
/// use yacu_core::{Suite, TestCase, TestContext, TestOutcome, yacu_assert_eq};
///
/// fn add(ctx: &mut TestContext<'_>) -> TestOutcome {
///     yacu_assert_eq!(ctx, 2 + 3, 5);
///     Ok(())
/// }
///
/// const MATH: &[TestCase] = &[TestCase::new("add", add)];
/// static SUITES: &[Suite] = &[Suite::new("Math", MATH)];
///
/// assert_eq!(SUITES[0].tests().len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Suite {
    name: &'static str,
    tests: &'static [TestCase],
}

impl Suite {
    pub const fn new(name: &'static str, tests: &'static [TestCase]) -> Self {
        Self { name, tests }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Tests in declaration order.
    pub const fn tests(&self) -> &'static [TestCase] {
        self.tests
    }

    pub fn find_test(&self, name: &str) -> Option<&'static TestCase> {
        self.tests.iter().find(|test| test.name == name)
    }
}

/// Optional single-suite / single-test selection.
///
/// A test filter is only meaningful under a suite filter; on its own it matches no test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFilter {
    pub suite: Option<String>,
    pub test: Option<String>,
}

impl RunFilter {
    /// Select every test.
    pub fn all() -> Self {
        Self::default()
    }

    /// Select every test of one suite.
    pub fn suite(suite: impl Into<String>) -> Self {
        Self {
            suite: Some(suite.into()),
            test: None,
        }
    }

    /// Select one test of one suite.
    pub fn test(suite: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            suite: Some(suite.into()),
            test: Some(test.into()),
        }
    }

    pub fn matches_suite(&self, suite: &Suite) -> bool {
        self.suite.as_deref().is_none_or(|name| name == suite.name())
    }

    /// Whether `test` runs, assuming its suite already matched.
    pub fn matches_test(&self, test: &TestCase) -> bool {
        match (&self.suite, &self.test) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(_), Some(name)) => name == test.name(),
        }
    }
}
