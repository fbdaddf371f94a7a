//! Snapshot tests for the console report.
//!
//! Diagnostic lines carry `file:line` of the check; those are replaced with
//! `<loc>` so the snapshots survive edits to this file.

use cut::{ConsoleReporter, TestCase, TestRunner, expect_eq, expect_near, expect_true};

fn report(tests: &mut [TestCase]) -> String {
    let mut runner = TestRunner::new(ConsoleReporter::new(Vec::new()));
    runner.run(tests);
    let out = String::from_utf8(runner.into_reporter().into_inner()).expect("report is UTF-8");
    normalize_locations(&out)
}

/// Replace `  - path.rs:123: ` prefixes with `  - <loc>: `.
fn normalize_locations(out: &str) -> String {
    out.lines()
        .map(|line| {
            let Some(rest) = line.strip_prefix("  - ") else {
                return line.to_string();
            };
            let Some(idx) = rest.find(".rs:") else {
                return line.to_string();
            };
            let after = &rest[idx + 4..];
            let digits = after.chars().take_while(|c| c.is_ascii_digit()).count();
            match after[digits..].strip_prefix(": ") {
                Some(description) if digits > 0 => format!("  - <loc>: {}", description),
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn snapshot_all_passing() {
    let mut tests = [
        TestCase::new("adds", |ctx| {
            expect_eq!(ctx, 4, 2 + 2);
        }),
        TestCase::new("approximates", |ctx| {
            expect_near!(ctx, 2.5, 2.52, 0.05);
        }),
    ];

    insta::assert_snapshot!(report(&mut tests), @r"
Running 2 test(s)
RUN
- adds
PASS
- adds
RUN
- approximates
PASS
- approximates
SUMMARY
- Executed 2 test(s)
- Passed 2 test(s)
- Failed 0 test(s)
");
}

#[test]
fn snapshot_mixed_results() {
    let mut tests = [
        TestCase::new("passes", |ctx| {
            expect_true!(ctx, true);
        }),
        TestCase::new("fails_twice", |ctx| {
            expect_eq!(ctx, 1, 2);
            expect_true!(ctx, 1 > 2);
        }),
        TestCase::new("panics", |_| {
            panic!("unexpected state");
        }),
    ];

    insta::assert_snapshot!(report(&mut tests), @r"
Running 3 test(s)
RUN
- passes
PASS
- passes
RUN
- fails_twice
FAIL
- fails_twice
  - <loc>: expect_eq(1, 2) failed: expected `1`, got `2`
  - <loc>: expect_true(1 > 2) failed
RUN
- panics
FAIL
- panics
  - test body panicked: unexpected state
SUMMARY
- Executed 3 test(s)
- Passed 1 test(s)
- Failed 2 test(s), listed below
  - fails_twice
  - panics
");
}

#[test]
fn normalize_leaves_names_alone() {
    assert_eq!(normalize_locations("  - fails_twice"), "  - fails_twice");
    assert_eq!(
        normalize_locations("  - tests/a.rs:12: expect_true(x) failed"),
        "  - <loc>: expect_true(x) failed"
    );
}
