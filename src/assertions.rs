//! Non-fatal assertion macros.
//!
//! Each macro takes the test's [`TestContext`](crate::TestContext) as its first
//! argument, records the call site with `file!()`/`line!()`, and embeds the checked
//! expressions' source text in the diagnostic. A failed check marks the test as
//! failed and lets the body continue with the next statement; the macros evaluate
//! to `true` when the check passed.
//!
//! | Macro | Passes iff |
//! |-------|------------|
//! | `expect!(ctx, cond, desc)` | `cond` |
//! | `expect_true!(ctx, x)` | `x` |
//! | `expect_false!(ctx, x)` | `!x` |
//! | `expect_eq!(ctx, expected, actual)` | `expected == actual` |
//! | `expect_near!(ctx, expected, actual, err)` | `expected - err <= actual <= expected + err` |
//! | `expect_panics!(ctx, code, Kind)` | `code` panics with a payload of type `Kind` |
//! | `expect_no_panic!(ctx, code)` | `code` does not panic |

/// Call-site location of the macro invocation.
#[doc(hidden)]
#[macro_export]
macro_rules! __cut_location {
    () => {
        $crate::SourceLocation::new(file!(), line!())
    };
}

/// Primitive check: fail with `description` unless `cond` holds.
#[macro_export]
macro_rules! expect {
    ($ctx:expr, $cond:expr, $description:expr $(,)?) => {
        $ctx.check_at($crate::__cut_location!(), $cond, || ::std::string::ToString::to_string(&$description))
    };
}

#[macro_export]
macro_rules! expect_true {
    ($ctx:expr, $cond:expr $(,)?) => {
        $crate::expect!($ctx, $cond, concat!("expect_true(", stringify!($cond), ") failed"))
    };
}

#[macro_export]
macro_rules! expect_false {
    ($ctx:expr, $cond:expr $(,)?) => {
        $crate::expect!($ctx, !($cond), concat!("expect_false(", stringify!($cond), ") failed"))
    };
}

/// Equality check. Both values must be the same `PartialEq + Debug` type.
#[macro_export]
macro_rules! expect_eq {
    ($ctx:expr, $expected:expr, $actual:expr $(,)?) => {
        $ctx.eq_at($crate::__cut_location!(), $expected, $actual, || {
            ::std::string::String::from(concat!(
                "expect_eq(",
                stringify!($expected),
                ", ",
                stringify!($actual),
                ") failed"
            ))
        })
    };
}

/// Tolerance check with inclusive bounds. A negative `err` is not rejected; it
/// makes the range empty so the check always fails.
#[macro_export]
macro_rules! expect_near {
    ($ctx:expr, $expected:expr, $actual:expr, $err:expr $(,)?) => {
        $ctx.near_at($crate::__cut_location!(), $expected, $actual, $err, || {
            ::std::string::String::from(concat!(
                "expect_near(",
                stringify!($expected),
                ", ",
                stringify!($actual),
                ", ",
                stringify!($err),
                ") failed"
            ))
        })
    };
}

/// Passes iff evaluating `code` panics with a payload of type `Kind`
/// (`std::panic::panic_any(Kind)`, or `&str`/`String` for `panic!` messages).
/// The panic is caught; it never leaves the check.
#[macro_export]
macro_rules! expect_panics {
    ($ctx:expr, $code:expr, $kind:ty $(,)?) => {
        $ctx.panics_at::<$kind>(
            $crate::__cut_location!(),
            || {
                let _ = $code;
            },
            || {
                ::std::string::String::from(concat!(
                    "expect_panics(",
                    stringify!($code),
                    ", ",
                    stringify!($kind),
                    ") failed"
                ))
            },
        )
    };
}

/// Passes iff evaluating `code` does not panic. Any panic is caught and recorded.
#[macro_export]
macro_rules! expect_no_panic {
    ($ctx:expr, $code:expr $(,)?) => {
        $ctx.no_panic_at(
            $crate::__cut_location!(),
            || {
                let _ = $code;
            },
            || ::std::string::String::from(concat!("expect_no_panic(", stringify!($code), ") failed")),
        )
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::{ConsoleReporter, TestCase, TestContext, TestOutcome, TestRunner};

    /// Run a single body through the runner and return (outcome, output).
    fn run_one(body: impl FnMut(&mut TestContext<'_>) + 'static) -> (TestOutcome, String) {
        let mut tests = [TestCase::new("subject", body)];
        let mut runner = TestRunner::new(ConsoleReporter::new(Vec::new()));
        runner.run(&mut tests);
        let out = String::from_utf8(runner.into_reporter().into_inner()).unwrap();
        (tests[0].outcome(), out)
    }

    #[test]
    fn test_expect_true_embeds_source_text() {
        let (outcome, out) = run_one(|ctx| {
            expect_true!(ctx, 1 > 2);
        });
        assert_eq!(outcome, TestOutcome::Failed);
        assert!(out.contains(": expect_true(1 > 2) failed\n"), "{out}");
        assert!(out.contains(file!()));
    }

    #[test]
    fn test_expect_false_negates() {
        let (outcome, _) = run_one(|ctx| {
            expect_false!(ctx, 1 > 2);
        });
        assert_eq!(outcome, TestOutcome::Passed);

        let (_, out) = run_one(|ctx| {
            expect_false!(ctx, true);
        });
        assert!(out.contains("expect_false(true) failed"));
    }

    #[test]
    fn test_expect_eq_embeds_both_expressions() {
        let (outcome, out) = run_one(|ctx| {
            let v = vec![1, 2, 3];
            expect_eq!(ctx, 2, v.len());
        });
        assert_eq!(outcome, TestOutcome::Failed);
        assert!(out.contains("expect_eq(2, v.len()) failed: expected `2`, got `3`"), "{out}");
    }

    #[test]
    fn test_expect_near_tolerance() {
        let (outcome, _) = run_one(|ctx| {
            expect_near!(ctx, 10.0, 10.4, 0.5);
        });
        assert_eq!(outcome, TestOutcome::Passed);

        let (outcome, out) = run_one(|ctx| {
            expect_near!(ctx, 10.0, 10.6, 0.5);
        });
        assert_eq!(outcome, TestOutcome::Failed);
        assert!(out.contains("expect_near(10.0, 10.6, 0.5) failed"));
    }

    #[derive(Debug)]
    struct ParseFailure;

    #[derive(Debug)]
    struct Timeout;

    fn parse_strict(input: &str) -> u32 {
        match input.parse() {
            Ok(n) => n,
            Err(_) => std::panic::panic_any(ParseFailure),
        }
    }

    #[test]
    fn test_expect_panics_by_kind() {
        let (outcome, _) = run_one(|ctx| {
            expect_panics!(ctx, parse_strict("x"), ParseFailure);
        });
        assert_eq!(outcome, TestOutcome::Passed);

        let (outcome, out) = run_one(|ctx| {
            expect_panics!(ctx, parse_strict("x"), Timeout);
        });
        assert_eq!(outcome, TestOutcome::Failed);
        assert!(out.contains("expect_panics(parse_strict(\"x\"), Timeout) failed"), "{out}");

        let (outcome, _) = run_one(|ctx| {
            expect_no_panic!(ctx, parse_strict("x"));
        });
        assert_eq!(outcome, TestOutcome::Failed);
    }

    fn first(bytes: &[u8]) -> u8 {
        bytes[0]
    }

    #[test]
    fn test_expect_panics_with_string_message() {
        let (outcome, _) = run_one(|ctx| {
            expect_panics!(ctx, first(&[]), String);
            expect_panics!(ctx, panic!("static message"), &str);
        });
        assert_eq!(outcome, TestOutcome::Passed);
    }

    #[test]
    fn test_expect_near_unsigned_lengths() {
        let (outcome, out) = run_one(|ctx| {
            let v = vec![1, 2, 3];
            expect_near!(ctx, 5usize, v.len(), 10usize);
            expect_near!(ctx, 250u8, 255u8, 10u8);
            expect_true!(ctx, true);
        });
        assert_eq!(outcome, TestOutcome::Passed, "unexpected output: {out}");

        let (outcome, out) = run_one(|ctx| {
            let v: Vec<u8> = Vec::new();
            expect_near!(ctx, 5usize, v.len(), 4usize);
        });
        assert_eq!(outcome, TestOutcome::Failed);
        assert!(out.contains("expect_near(5usize, v.len(), 4usize) failed: expected `5` +/- `4`, got `0`"));
        assert!(!out.contains("panicked"));
    }

    #[test]
    fn test_body_continues_after_failures() {
        let (outcome, out) = run_one(|ctx| {
            expect_true!(ctx, false);
            expect_no_panic!(ctx, parse_strict("nope"));
            expect_eq!(ctx, 1, 2);
        });
        assert_eq!(outcome, TestOutcome::Failed);
        assert_eq!(out.matches("FAIL\n").count(), 1);
        let diagnostics = out
            .lines()
            .skip_while(|l| *l != "FAIL")
            .take_while(|l| *l != "SUMMARY")
            .filter(|l| l.starts_with("  - "))
            .count();
        assert_eq!(diagnostics, 3);
        assert!(out.ends_with("listed below\n  - subject\n"));
        assert!(!out.contains("PASS"));
    }

    #[test]
    fn test_macros_evaluate_to_result() {
        let seen = Rc::new(Cell::new((false, true)));
        let sink = Rc::clone(&seen);
        let (_, out) = run_one(move |ctx| {
            let passed = expect_true!(ctx, true);
            let failed = expect!(ctx, false, "custom");
            sink.set((passed, failed));
        });
        assert_eq!(seen.get(), (true, false));
        assert!(out.contains(": custom\n"));
    }
}
