//! Per-test run context.
//!
//! The runner hands every test body a [`TestContext`] for the test being executed.
//! All checks go through it: a failing check latches the test's outcome to
//! [`TestOutcome::Failed`] and reports a diagnostic line, then returns so the body
//! keeps running. Because the context only exists while a body is executing, a
//! check can never fire outside a run or against the wrong test.

use std::any::{self, Any};
use std::fmt::{self, Debug};
use std::ops::Sub;
use std::panic::{self, AssertUnwindSafe, Location};

use crate::case::TestOutcome;
use crate::error::{TestError, panic_message};
use crate::reporter::TestReporter;

/// File and line of a check's call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(loc: &'static Location<'static>) -> Self {
        Self::new(loc.file(), loc.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Handle to the currently executing test.
pub struct TestContext<'a> {
    name: &'a str,
    outcome: &'a mut TestOutcome,
    reporter: &'a mut dyn TestReporter,
}

impl<'a> TestContext<'a> {
    pub(crate) fn new(name: &'a str, outcome: &'a mut TestOutcome, reporter: &'a mut dyn TestReporter) -> Self {
        Self {
            name,
            outcome,
            reporter,
        }
    }

    /// Name of the executing test.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Whether any check in this test has failed so far.
    pub fn failed(&self) -> bool {
        self.outcome.is_failed()
    }

    /// Latch the test as failed.
    ///
    /// The first call emits the `FAIL` event and returns `true`; later calls change
    /// nothing and return `false`.
    pub fn mark_failed(&mut self) -> bool {
        if self.outcome.is_failed() {
            return false;
        }
        *self.outcome = TestOutcome::Failed;
        tracing::debug!(test = self.name, "test marked failed");
        self.reporter.on_test_fail(self.name);
        true
    }

    /// Record a failed check at `location`: latch the outcome, then print the diagnostic.
    pub fn fail_at(&mut self, location: SourceLocation, description: &str) {
        self.mark_failed();
        self.reporter.on_assertion_failure(location, description);
    }

    /// Primitive check with an explicit location and a lazily built description.
    ///
    /// Returns `cond` so callers can branch on the result.
    pub fn check_at(&mut self, location: SourceLocation, cond: bool, description: impl FnOnce() -> String) -> bool {
        if !cond {
            self.fail_at(location, &description());
        }
        cond
    }

    pub(crate) fn report_panic(&mut self, error: &TestError) {
        self.mark_failed();
        self.reporter.on_test_panic(self.name, error);
    }

    // ------------------------------------------------------------------------
    // Checks located at the caller
    // ------------------------------------------------------------------------

    /// Fail the test with `description` unless `cond` holds.
    #[track_caller]
    pub fn check(&mut self, cond: bool, description: &str) -> bool {
        self.check_at(SourceLocation::caller(), cond, || description.to_string())
    }

    #[track_caller]
    pub fn check_true(&mut self, value: bool) -> bool {
        self.check_at(SourceLocation::caller(), value, || "check_true failed".to_string())
    }

    #[track_caller]
    pub fn check_false(&mut self, value: bool) -> bool {
        self.check_at(SourceLocation::caller(), !value, || "check_false failed".to_string())
    }

    #[track_caller]
    pub fn check_eq<T: PartialEq + Debug>(&mut self, expected: T, actual: T) -> bool {
        let location = SourceLocation::caller();
        self.eq_at(location, expected, actual, || "check_eq failed".to_string())
    }

    /// Passes iff `expected - err <= actual <= expected + err`.
    #[track_caller]
    pub fn check_near<T>(&mut self, expected: T, actual: T, err: T) -> bool
    where
        T: PartialOrd + Sub<Output = T> + Copy + Debug,
    {
        let location = SourceLocation::caller();
        self.near_at(location, expected, actual, err, || "check_near failed".to_string())
    }

    /// Passes iff `code` panics with a payload of type `K`.
    #[track_caller]
    pub fn check_panics<K: Any>(&mut self, code: impl FnOnce()) -> bool {
        let location = SourceLocation::caller();
        self.panics_at::<K>(location, code, || format!("check_panics::<{}> failed", any::type_name::<K>()))
    }

    /// Passes iff `code` completes without panicking.
    #[track_caller]
    pub fn check_no_panic(&mut self, code: impl FnOnce()) -> bool {
        let location = SourceLocation::caller();
        self.no_panic_at(location, code, || "check_no_panic failed".to_string())
    }

    // ------------------------------------------------------------------------
    // Located variants used by the `expect_*!` macros
    // ------------------------------------------------------------------------

    #[doc(hidden)]
    pub fn eq_at<T: PartialEq + Debug>(
        &mut self,
        location: SourceLocation,
        expected: T,
        actual: T,
        description: impl FnOnce() -> String,
    ) -> bool {
        let ok = expected == actual;
        self.check_at(location, ok, || {
            format!("{}: expected `{:?}`, got `{:?}`", description(), expected, actual)
        })
    }

    #[doc(hidden)]
    pub fn near_at<T>(
        &mut self,
        location: SourceLocation,
        expected: T,
        actual: T,
        err: T,
        description: impl FnOnce() -> String,
    ) -> bool
    where
        T: PartialOrd + Sub<Output = T> + Copy + Debug,
    {
        // Inclusive bounds, margin not validated. Always subtract the smaller
        // operand so unsigned types cannot underflow.
        let ok = if actual >= expected {
            actual - expected <= err
        } else {
            expected - actual <= err
        };
        self.check_at(location, ok, || {
            format!(
                "{}: expected `{:?}` +/- `{:?}`, got `{:?}`",
                description(),
                expected,
                err,
                actual
            )
        })
    }

    #[doc(hidden)]
    pub fn panics_at<K: Any>(
        &mut self,
        location: SourceLocation,
        code: impl FnOnce(),
        description: impl FnOnce() -> String,
    ) -> bool {
        let result = match panic::catch_unwind(AssertUnwindSafe(code)) {
            Ok(()) => Err(TestError::NotPanicked),
            Err(payload) if payload.is::<K>() => Ok(()),
            Err(payload) => Err(TestError::WrongPanicKind {
                expected: any::type_name::<K>(),
                message: panic_message(payload.as_ref()),
            }),
        };
        self.result_at(location, result, description)
    }

    #[doc(hidden)]
    pub fn no_panic_at(
        &mut self,
        location: SourceLocation,
        code: impl FnOnce(),
        description: impl FnOnce() -> String,
    ) -> bool {
        let result = panic::catch_unwind(AssertUnwindSafe(code)).map_err(|payload| TestError::UnexpectedPanic {
            message: panic_message(payload.as_ref()),
        });
        self.result_at(location, result, description)
    }

    fn result_at(
        &mut self,
        location: SourceLocation,
        result: Result<(), TestError>,
        description: impl FnOnce() -> String,
    ) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                self.fail_at(location, &format!("{}: {}", description(), e));
                false
            }
        }
    }
}

impl Debug for TestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
