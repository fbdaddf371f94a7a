//! The harness's own test suite, written with the harness.
//!
//! `suite()` must pass in full; `demo_failures()` fails on purpose so the
//! failure path of the console report can be seen from the binary.

use std::panic;

use crate::{
    ConsoleReporter, RunnerConfig, TestCase, TestContext, TestOutcome, TestRunner, expect, expect_eq, expect_false,
    expect_near, expect_no_panic, expect_panics, expect_true, test_case,
};

/// Panic payload raised by [`checked_div`].
#[derive(Debug)]
pub struct DivisionByZero;

/// Panic payload that [`checked_div`] never raises.
#[derive(Debug)]
pub struct Overflow;

fn checked_div(a: i64, b: i64) -> i64 {
    if b == 0 {
        panic::panic_any(DivisionByZero);
    }
    a / b
}

/// Run `tests` through a nested runner and return the captured report.
fn nested_report(tests: &mut [TestCase]) -> String {
    let mut runner = TestRunner::with_config(ConsoleReporter::new(Vec::new()), RunnerConfig::default());
    runner.run(tests);
    String::from_utf8_lossy(runner.reporter().get_ref()).into_owned()
}

// ============================================================================
// Passing suite
// ============================================================================

fn boolean_checks(ctx: &mut TestContext<'_>) {
    expect_true!(ctx, "cut".starts_with('c'));
    expect_false!(ctx, "cut".is_empty());
}

fn equality_checks(ctx: &mut TestContext<'_>) {
    expect_eq!(ctx, 2, 1 + 1);
    expect_eq!(ctx, "harness".to_string(), ["har", "ness"].concat());
    expect_eq!(ctx, Some('b'), "abc".chars().nth(1));
}

fn tolerance_checks(ctx: &mut TestContext<'_>) {
    expect_near!(ctx, 10.0, 10.4, 0.5);
    expect_near!(ctx, 10.0, 9.5, 0.5);
    expect_near!(ctx, 100, 98, 2);
}

fn panic_checks(ctx: &mut TestContext<'_>) {
    expect_panics!(ctx, checked_div(1, 0), DivisionByZero);
    expect_no_panic!(ctx, checked_div(8, 2));
    expect_eq!(ctx, 4, checked_div(8, 2));
}

fn failure_is_counted_once(ctx: &mut TestContext<'_>) {
    let mut tests = [TestCase::new("inner", |inner| {
        expect_true!(inner, false);
        expect_eq!(inner, 1, 2);
        expect_true!(inner, true);
    })];
    let report = nested_report(&mut tests);

    expect_eq!(ctx, TestOutcome::Failed, tests[0].outcome());
    expect_eq!(ctx, 1, report.matches("FAIL\n- inner\n").count());
    expect_eq!(ctx, 2, report.lines().filter(|l| l.starts_with("  - ") && l.contains("failed")).count());
    expect!(ctx, !report.contains("PASS"), "a failed test must not report PASS");
}

fn summary_lists_failures_in_order(ctx: &mut TestContext<'_>) {
    let mut tests = [
        TestCase::new("a", |inner| {
            expect_true!(inner, false);
        }),
        TestCase::new("b", |_| {}),
        TestCase::new("c", |inner| {
            expect_false!(inner, true);
        }),
    ];
    let report = nested_report(&mut tests);

    expect!(
        ctx,
        report.ends_with("- Failed 2 test(s), listed below\n  - a\n  - c\n"),
        "failed names listed in declaration order"
    );
    expect_true!(ctx, report.contains("- Passed 1 test(s)\n"));
}

fn escaped_panic_is_isolated(ctx: &mut TestContext<'_>) {
    let mut tests = [
        TestCase::new("explodes", |_| {
            checked_div(1, 0);
        }),
        TestCase::new("after", |_| {}),
    ];
    let report = nested_report(&mut tests);

    expect_eq!(ctx, TestOutcome::Failed, tests[0].outcome());
    expect_eq!(ctx, TestOutcome::Passed, tests[1].outcome());
    expect_true!(ctx, report.contains("test body panicked"));
}

/// Tests that must all pass.
pub fn suite() -> Vec<TestCase> {
    vec![
        test_case!(boolean_checks),
        test_case!(equality_checks),
        test_case!(tolerance_checks),
        test_case!(panic_checks),
        test_case!(failure_is_counted_once),
        test_case!(summary_lists_failures_in_order),
        test_case!(escaped_panic_is_isolated),
    ]
}

// ============================================================================
// Demonstration failures
// ============================================================================

fn demo_failing_boolean(ctx: &mut TestContext<'_>) {
    expect_true!(ctx, false);
}

fn demo_out_of_tolerance(ctx: &mut TestContext<'_>) {
    expect_near!(ctx, 10.0, 10.6, 0.5);
}

fn demo_wrong_panic_kind(ctx: &mut TestContext<'_>) {
    expect_panics!(ctx, checked_div(1, 0), Overflow);
    expect_panics!(ctx, checked_div(1, 1), DivisionByZero);
}

fn demo_escaped_panic(_ctx: &mut TestContext<'_>) {
    checked_div(1, 0);
}

/// Tests that fail on purpose.
pub fn demo_failures() -> Vec<TestCase> {
    vec![
        test_case!(demo_failing_boolean),
        test_case!(demo_out_of_tolerance),
        test_case!(demo_wrong_panic_kind),
        test_case!(demo_escaped_panic),
    ]
}
