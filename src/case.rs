//! Test registry entries.
//!
//! A [`TestCase`] pairs a display name with a test body and the outcome of the
//! current run. The caller owns the cases; the runner borrows them mutably for
//! the duration of a run and the outcome is only ever changed through
//! [`TestContext::mark_failed`](crate::TestContext::mark_failed).

use std::fmt;

use crate::context::TestContext;

/// Pass/fail status of a single test for the current run.
///
/// `Failed` is terminal: once a test has failed it never reverts to `Passed`
/// within the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestOutcome {
    #[default]
    Passed,
    Failed,
}

impl TestOutcome {
    pub fn is_passed(self) -> bool {
        matches!(self, TestOutcome::Passed)
    }

    pub fn is_failed(self) -> bool {
        matches!(self, TestOutcome::Failed)
    }

    /// Event label used in console output.
    pub fn as_str(self) -> &'static str {
        match self {
            TestOutcome::Passed => "PASS",
            TestOutcome::Failed => "FAIL",
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boxed test body. Receives the per-test context handle used by all checks.
pub type TestBody = Box<dyn FnMut(&mut TestContext<'_>)>;

/// One registered test.
pub struct TestCase {
    pub(crate) name: String,
    pub(crate) body: TestBody,
    pub(crate) outcome: TestOutcome,
}

impl TestCase {
    /// Create a new test case. The outcome starts as [`TestOutcome::Passed`].
    pub fn new(name: impl Into<String>, body: impl FnMut(&mut TestContext<'_>) + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
            outcome: TestOutcome::Passed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outcome of the most recent run (or `Passed` if never run).
    pub fn outcome(&self) -> TestOutcome {
        self.outcome
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

/// Build a [`TestCase`] from a function, naming it after the function's identifier.
///
/// ```
/// use cut::{TestCase, TestContext, expect_true, test_case};
///
/// fn truth_holds(ctx: &mut TestContext<'_>) {
///     expect_true!(ctx, 1 < 2);
/// }
///
/// let case: TestCase = test_case!(truth_holds);
/// assert_eq!(case.name(), "truth_holds");
/// ```
#[macro_export]
macro_rules! test_case {
    ($fun:path) => {
        $crate::TestCase::new(stringify!($fun), $fun)
    };
}
