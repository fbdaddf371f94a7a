//! CLI module for the `cut-selftest` binary
//!
//! The binary runs the harness's own test suite through the harness, so the
//! console format and exit-code contract can be inspected end to end.
//!
//! ## Flags
//!
//! - `--demo-failures` - append tests that fail on purpose, to show failure output
//! - `--no-isolation` - let a panic escaping a test body abort the run
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! `execute` returns `CliResult<ExitCode>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod selftest;

use std::fmt;
use std::process;

use clap::Parser;

use crate::reporter::ConsoleReporter;
use crate::runner::{RunnerConfig, TestRunner};

// ============================================================================
// Exit codes and CLI errors
// ============================================================================

/// Process exit code of a run: `0` iff every test passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);

    pub fn is_success(self) -> bool {
        self.0 == 0
    }
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the harness's own test suite
#[derive(Parser, Debug)]
#[command(name = "cut-selftest")]
#[command(version = VERSION)]
#[command(about = "Run the cut harness against its own test suite", long_about = None)]
pub struct Cli {
    /// Append tests that fail on purpose, to show failure output
    #[arg(long = "demo-failures")]
    pub demo_failures: bool,

    /// Let a panic escaping a test body abort the run instead of failing that test
    #[arg(long = "no-isolation")]
    pub no_isolation: bool,
}

impl Cli {
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::default().with_isolate_panics(!self.no_isolation)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if !exit_code.is_success() {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the self-test run and return its exit code.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let mut tests = selftest::suite();
    if cli.demo_failures {
        tests.extend(selftest::demo_failures());
    }

    tracing::debug!(
        test_count = tests.len(),
        isolate_panics = !cli.no_isolation,
        "starting self-test run"
    );

    let mut runner = TestRunner::with_config(ConsoleReporter::stdout(), cli.runner_config());
    let summary = runner.run(&mut tests);

    if summary.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Summary already printed; exit quietly with the failure code.
        Err(CliError::new("", summary.exit_code()))
    }
}

// ============================================================================
// Tests
// ============================================================================
