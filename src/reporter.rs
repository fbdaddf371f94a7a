//! Test reporting.
//!
//! ## TestReporter Trait
//!
//! The runner and the checks never print directly. Every event goes through a
//! [`TestReporter`], so the console format lives in one place and tests can
//! capture output by pointing a [`ConsoleReporter`] at a `Vec<u8>`.
//!
//! ## Output format
//!
//! ```text
//! Running 2 test(s)
//! RUN
//! - adds_numbers
//! PASS
//! - adds_numbers
//! RUN
//! - divides_numbers
//! FAIL
//! - divides_numbers
//!   - tests/math.rs:14: expect_eq(4, 7 / 2) failed: expected `4`, got `3`
//! SUMMARY
//! - Executed 2 test(s)
//! - Passed 1 test(s)
//! - Failed 1 test(s), listed below
//!   - divides_numbers
//! ```

use std::io::{self, Write};
use std::time::Duration;

use crate::context::SourceLocation;
use crate::error::TestError;
use crate::ExitCode;

// ============================================================================
// Test Reporter Trait
// ============================================================================

/// Trait for reporting test execution events.
pub trait TestReporter {
    /// Called once before the first test runs
    fn on_run_start(&mut self, test_count: usize);

    /// Called right before a test body is invoked
    fn on_test_start(&mut self, name: &str);

    /// Called after a body returns with its outcome still passing
    fn on_test_pass(&mut self, name: &str);

    /// Called at the moment a test first fails
    fn on_test_fail(&mut self, name: &str);

    /// Called for every failing check, including repeated failures in one test
    fn on_assertion_failure(&mut self, location: SourceLocation, description: &str);

    /// Called when the runner catches a panic that escaped a test body
    fn on_test_panic(&mut self, _name: &str, _error: &TestError) {}

    /// Called once after every test has run
    fn on_run_complete(&mut self, summary: &TestSummary);
}

/// Summary of a test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Names of failed tests, in the order the tests were supplied
    pub failed_names: Vec<String>,
    pub duration: Duration,
}

impl TestSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// `SUCCESS` iff no test failed.
    pub fn exit_code(&self) -> ExitCode {
        if self.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Console Reporter
// ============================================================================

/// Line-oriented, human-readable reporter.
///
/// Write errors are ignored: the report is best-effort and must not turn into a
/// test failure or abort the run.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn event(&mut self, label: &str, name: &str) {
        let _ = writeln!(self.out, "{}\n- {}", label, name);
    }
}

impl<W: Write> TestReporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, test_count: usize) {
        let _ = writeln!(self.out, "Running {} test(s)", test_count);
    }

    fn on_test_start(&mut self, name: &str) {
        self.event("RUN", name);
    }

    fn on_test_pass(&mut self, name: &str) {
        self.event("PASS", name);
    }

    fn on_test_fail(&mut self, name: &str) {
        self.event("FAIL", name);
    }

    fn on_assertion_failure(&mut self, location: SourceLocation, description: &str) {
        let _ = writeln!(self.out, "  - {}: {}", location, description);
    }

    fn on_test_panic(&mut self, _name: &str, error: &TestError) {
        let _ = writeln!(self.out, "  - {}", error);
    }

    fn on_run_complete(&mut self, summary: &TestSummary) {
        let _ = write!(
            self.out,
            "SUMMARY\n- Executed {} test(s)\n- Passed {} test(s)\n- Failed {} test(s)",
            summary.total, summary.passed, summary.failed
        );

        if summary.all_passed() {
            let _ = writeln!(self.out);
        } else {
            let _ = writeln!(self.out, ", listed below");
            for name in &summary.failed_names {
                let _ = writeln!(self.out, "  - {}", name);
            }
        }

        let _ = self.out.flush();
    }
}
