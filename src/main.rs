//! yacu demo: the harness running a few passing, failing and crashing tests.
//!
//! `yacu-demo --list` shows the table; `yacu-demo --suite Math` runs the arithmetic examples.

use std::process;

use yacu::{
    Suite, TestCase, TestContext, TestOutcome, yacu_assert, yacu_assert_approx_eq, yacu_assert_eq, yacu_assert_lt,
};

fn add(a: i32, b: i32) -> i32 {
    a + b
}

fn add_ok(ctx: &mut TestContext<'_>) -> TestOutcome {
    yacu_assert_eq!(ctx, add(2, 3), 5);
    yacu_assert_lt!(ctx, add(-1, 1), 1);
    Ok(())
}

fn add_bad(ctx: &mut TestContext<'_>) -> TestOutcome {
    yacu_assert_eq!(ctx, 2 + 3, 6);
    Ok(())
}

fn approx_sum(ctx: &mut TestContext<'_>) -> TestOutcome {
    let sum: f64 = [0.1; 10].iter().sum();
    yacu_assert_approx_eq!(ctx, sum, 1.0, 1e-9);
    Ok(())
}

fn panics(_ctx: &mut TestContext<'_>) -> TestOutcome {
    let values: Vec<i32> = Vec::new();
    let first = values.first().copied();
    panic!("no first element: {first:?}");
}

fn exits_early(_ctx: &mut TestContext<'_>) -> TestOutcome {
    process::exit(42);
}

fn aborts(_ctx: &mut TestContext<'_>) -> TestOutcome {
    process::abort();
}

fn first_failure_only(ctx: &mut TestContext<'_>) -> TestOutcome {
    check_positive(ctx, -1)?;
    check_positive(ctx, -2)?;
    Ok(())
}

fn check_positive(ctx: &mut TestContext<'_>, value: i32) -> TestOutcome {
    yacu_assert!(ctx, value > 0, "value {value} is not positive");
    Ok(())
}

/// Runs after the crashing tests; passes only if the harness survived them.
fn after_crash(ctx: &mut TestContext<'_>) -> TestOutcome {
    yacu_assert_eq!(ctx, add(1, 1), 2);
    Ok(())
}

const MATH: &[TestCase] = &[
    TestCase::new("addOk", add_ok),
    TestCase::new("addBad", add_bad),
    TestCase::new("approxSum", approx_sum),
];

const ISOLATION: &[TestCase] = &[
    TestCase::new("panics", panics),
    TestCase::new("exitsEarly", exits_early),
    TestCase::new("aborts", aborts),
    TestCase::new("firstFailureOnly", first_failure_only),
    TestCase::new("afterCrash", after_crash),
    TestCase::new("-leadingDash", add_ok),
];

static SUITES: [Suite; 2] = [Suite::new("Math", MATH), Suite::new("Isolation", ISOLATION)];

fn main() {
    yacu::cli::run(&SUITES);
}
