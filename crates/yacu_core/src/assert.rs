//! The assertion contract.
//!
//! Every check goes through [`TestContext::fail`]: on failure the message is recorded, the result
//! becomes [`Status::TestFailure`](crate::Status::TestFailure), and the macro returns
//! `Err(AssertionFailure)` from the enclosing test body. Code after a failed assertion never runs.
//!
//! Operands are evaluated exactly once and rendered into the message next to their source text:
//!
//! ```text
//! Condition 2 + 3 == 6 (5 == 6) failed at (src/main.rs:12)
//! Condition |sum - 5.0| < 1e-6 (|5.1 - 5| < 0.000001) failed at (src/main.rs:20)
//! ```
//!
//! [`TestContext::fail`]: crate::TestContext::fail

use std::fmt;

/// Result of a test body. `Err` means an assertion failed and was already recorded.
pub type TestOutcome = Result<(), AssertionFailure>;

/// Token proving a failure was recorded on a [`TestContext`](crate::TestContext).
///
/// It can only be obtained from [`TestContext::fail`](crate::TestContext::fail).
#[must_use = "return the failure from the test body to stop it"]
#[derive(Debug, PartialEq, Eq)]
pub struct AssertionFailure {
    _recorded: (),
}

impl AssertionFailure {
    pub(crate) fn new() -> Self {
        Self { _recorded: () }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("assertion failed")
    }
}

impl std::error::Error for AssertionFailure {}

/// Fail the test unconditionally.
#[macro_export]
macro_rules! yacu_fail {
    ($ctx:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err($ctx.fail(::std::format!(
            "{} at ({}:{})",
            ::std::format_args!($($arg)+),
            ::core::file!(),
            ::core::line!()
        )))
    };
}

/// Fail the test unless `cond` holds.
#[macro_export]
macro_rules! yacu_assert {
    ($ctx:expr, $cond:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($ctx.fail(::std::format!(
                "Condition {} failed at ({}:{})",
                ::core::stringify!($cond),
                ::core::file!(),
                ::core::line!()
            )));
        }
    };
    ($ctx:expr, $cond:expr, $($arg:tt)+) => {
        if !$cond {
            return ::core::result::Result::Err($ctx.fail(::std::format!(
                "Condition {} failed: {} at ({}:{})",
                ::core::stringify!($cond),
                ::std::format_args!($($arg)+),
                ::core::file!(),
                ::core::line!()
            )));
        }
    };
}

/// Compare two operands with `op`; the building block of the `yacu_assert_<op>!` macros.
#[macro_export]
macro_rules! yacu_assert_cmp {
    ($ctx:expr, $a:expr, $op:tt, $b:expr) => {
        match (&$a, &$b) {
            (lhs, rhs) => {
                if !(*lhs $op *rhs) {
                    return ::core::result::Result::Err($ctx.fail(::std::format!(
                        "Condition {} {} {} ({:?} {} {:?}) failed at ({}:{})",
                        ::core::stringify!($a),
                        ::core::stringify!($op),
                        ::core::stringify!($b),
                        lhs,
                        ::core::stringify!($op),
                        rhs,
                        ::core::file!(),
                        ::core::line!()
                    )));
                }
            }
        }
    };
}

#[macro_export]
macro_rules! yacu_assert_eq {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $crate::yacu_assert_cmp!($ctx, $a, ==, $b)
    };
}

#[macro_export]
macro_rules! yacu_assert_ne {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $crate::yacu_assert_cmp!($ctx, $a, !=, $b)
    };
}

#[macro_export]
macro_rules! yacu_assert_lt {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $crate::yacu_assert_cmp!($ctx, $a, <, $b)
    };
}

#[macro_export]
macro_rules! yacu_assert_le {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $crate::yacu_assert_cmp!($ctx, $a, <=, $b)
    };
}

#[macro_export]
macro_rules! yacu_assert_gt {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $crate::yacu_assert_cmp!($ctx, $a, >, $b)
    };
}

#[macro_export]
macro_rules! yacu_assert_ge {
    ($ctx:expr, $a:expr, $b:expr $(,)?) => {
        $crate::yacu_assert_cmp!($ctx, $a, >=, $b)
    };
}

/// Fail unless `|a - b| < tol`, all three operands as `f64`.
#[macro_export]
macro_rules! yacu_assert_approx_eq {
    ($ctx:expr, $a:expr, $b:expr, $tol:expr $(,)?) => {
        match ($a, $b, $tol) {
            (lhs, rhs, tol) => {
                let (lhs, rhs, tol): (f64, f64, f64) = (lhs, rhs, tol);
                if !((lhs - rhs).abs() < tol) {
                    return ::core::result::Result::Err($ctx.fail(::std::format!(
                        "Condition |{} - {}| < {} (|{} - {}| < {}) failed at ({}:{})",
                        ::core::stringify!($a),
                        ::core::stringify!($b),
                        ::core::stringify!($tol),
                        lhs,
                        rhs,
                        tol,
                        ::core::file!(),
                        ::core::line!()
                    )));
                }
            }
        }
    };
}
