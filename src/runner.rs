//! Test runner.
//!
//! Executes an ordered slice of [`TestCase`]s one at a time, in the order given,
//! and reports `RUN`/`PASS` events and the final summary through a
//! [`TestReporter`]. `FAIL` events come from the checks themselves, at the moment
//! a test first fails.
//!
//! ## Panic isolation
//!
//! With [`RunnerConfig::isolate_panics`] enabled (the default) each body runs under
//! `catch_unwind`. A panic escaping a body marks that test failed, is reported as a
//! diagnostic line, and the run moves on to the next test. With isolation disabled
//! the panic unwinds out of [`TestRunner::run`] and no summary is printed.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::case::TestCase;
use crate::context::TestContext;
use crate::error::{TestError, panic_message};
use crate::reporter::{ConsoleReporter, TestReporter, TestSummary};
use crate::ExitCode;

/// Runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Catch panics that escape a test body and record them as failures
    pub isolate_panics: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { isolate_panics: true }
    }
}

impl RunnerConfig {
    pub fn with_isolate_panics(mut self, isolate_panics: bool) -> Self {
        self.isolate_panics = isolate_panics;
        self
    }
}

/// Sequential test runner.
pub struct TestRunner<R: TestReporter> {
    reporter: R,
    config: RunnerConfig,
}

impl<R: TestReporter> TestRunner<R> {
    pub fn new(reporter: R) -> Self {
        Self::with_config(reporter, RunnerConfig::default())
    }

    pub fn with_config(reporter: R, config: RunnerConfig) -> Self {
        Self { reporter, config }
    }

    pub fn config(&self) -> RunnerConfig {
        self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run every test in order and return the summary.
    ///
    /// Outcomes are reset to `Passed` before each test runs, so a slice can be run
    /// more than once.
    #[tracing::instrument(skip_all, fields(test_count = tests.len()))]
    pub fn run(&mut self, tests: &mut [TestCase]) -> TestSummary {
        let start = Instant::now();
        self.reporter.on_run_start(tests.len());

        let mut passed = 0;
        for case in tests.iter_mut() {
            if self.run_one(case) {
                passed += 1;
            }
        }

        let failed_names: Vec<String> = tests
            .iter()
            .filter(|t| t.outcome().is_failed())
            .map(|t| t.name().to_string())
            .collect();

        let summary = TestSummary {
            total: tests.len(),
            passed,
            failed: tests.len() - passed,
            failed_names,
            duration: start.elapsed(),
        };

        tracing::debug!(
            passed = summary.passed,
            failed = summary.failed,
            elapsed_ms = summary.duration.as_millis() as u64,
            "test run complete"
        );
        self.reporter.on_run_complete(&summary);
        summary
    }

    /// Run a single test; returns `true` if it passed.
    fn run_one(&mut self, case: &mut TestCase) -> bool {
        let TestCase { name, body, outcome } = case;
        let body = &mut **body;
        *outcome = Default::default();

        self.reporter.on_test_start(name);
        tracing::trace!(test = %name, "running test");
        let started = Instant::now();

        let mut ctx = TestContext::new(name, outcome, &mut self.reporter);
        if self.config.isolate_panics {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| body(&mut ctx))) {
                let error = TestError::Panicked {
                    message: panic_message(payload.as_ref()),
                };
                tracing::warn!(test = %name, %error, "panic escaped test body");
                ctx.report_panic(&error);
            }
        } else {
            body(&mut ctx);
        }
        drop(ctx);

        tracing::trace!(
            test = %name,
            outcome = %outcome,
            elapsed_us = started.elapsed().as_micros() as u64,
            "test finished"
        );

        if outcome.is_passed() {
            self.reporter.on_test_pass(name);
            true
        } else {
            false
        }
    }
}

impl<R: TestReporter> TestRunner<R> {
    /// Run the tests and map the summary to a process exit code.
    pub fn run_to_exit_code(&mut self, tests: &mut [TestCase]) -> ExitCode {
        self.run(tests).exit_code()
    }
}

/// Run `tests` with the default configuration, reporting to stdout.
///
/// Returns [`ExitCode::SUCCESS`] iff every test passed.
pub fn run_tests(tests: &mut [TestCase]) -> ExitCode {
    TestRunner::new(ConsoleReporter::stdout()).run_to_exit_code(tests)
}
