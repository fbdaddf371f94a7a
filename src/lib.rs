#![forbid(unsafe_code)]
//! Cut: a minimal unit-test harness
//!
//! Register named test functions, run them in order, and print a per-test
//! `RUN`/`PASS`/`FAIL` log followed by a summary. Checks are non-fatal: a failing
//! check marks its test failed and the body keeps running.
//!
//! ```no_run
//! use cut::{TestContext, expect_eq, expect_near, expect_true, run_tests, test_case};
//!
//! fn arithmetic(ctx: &mut TestContext<'_>) {
//!     expect_eq!(ctx, 2, 1 + 1);
//!     expect_near!(ctx, 10.0, 10.4, 0.5);
//! }
//!
//! fn ordering(ctx: &mut TestContext<'_>) {
//!     expect_true!(ctx, 1 < 2);
//! }
//!
//! let mut tests = [test_case!(arithmetic), test_case!(ordering)];
//! std::process::exit(run_tests(&mut tests).0);
//! ```
//!
//! ## Modules
//!
//! - `case` - test registry entries and outcomes
//! - `context` - the per-test handle every check reports through
//! - `assertions` - `expect_*!` macros
//! - `runner` - sequential execution and the run summary
//! - `reporter` - console output
//! - `cli` - exit codes and the `cut-selftest` binary
//!
//! ## Panic Policy
//!
//! Production code returns `Result`/`Option` and never calls `.unwrap()` or `.expect()`.
//! Test code may.

pub mod assertions;
pub mod case;
pub mod cli;
pub mod context;
pub mod error;
pub mod reporter;
pub mod runner;

pub use case::{TestBody, TestCase, TestOutcome};
pub use cli::ExitCode;
pub use context::{SourceLocation, TestContext};
pub use error::TestError;
pub use reporter::{ConsoleReporter, TestReporter, TestSummary};
pub use runner::{RunnerConfig, TestRunner, run_tests};
