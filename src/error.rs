//! Error types for the harness.
//!
//! Failures inside a test never propagate as Rust errors: they are absorbed into the test's
//! outcome and printed. [`TestError`] describes those failures so the reporter and logs share
//! one wording.

use std::any::Any;

use thiserror::Error;

/// Failures detected while executing a test body or a panic check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    /// A panic escaped the test body and was caught by the runner.
    #[error("test body panicked: {message}")]
    Panicked { message: String },

    /// `expect_panics!` ran code that completed normally.
    #[error("expected a panic, but the code completed normally")]
    NotPanicked,

    /// `expect_panics!` caught a panic whose payload had a different type.
    #[error("expected a panic of kind `{expected}`, got: {message}")]
    WrongPanicKind { expected: &'static str, message: String },

    /// `expect_no_panic!` caught a panic.
    #[error("unexpected panic: {message}")]
    UnexpectedPanic { message: String },
}

/// Render a panic payload as text.
///
/// `panic!` payloads are `&'static str` or `String`; anything else (e.g. `panic_any` with a
/// custom type) has no generic textual form.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
