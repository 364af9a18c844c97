//! Test execution engine.
//!
//! The engine interprets the three embedded mini-grammars against a per-test [`Context`]:
//!
//! - `eval` - expressions and function dispatch (built-ins first, then the external bridge)
//! - `statement` - `target = expression` mutations, including nested property targets
//! - `expectation` - `expect: left <op> right` assertions
//! - `runner` - the per-test state machine producing a [`TestResult`]
//!
//! Parsing lives in `verdict_syntax`; value semantics (comparison, built-in arithmetic) live in `verdict_core`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod context;
pub mod error;
pub mod eval;
pub mod expectation;
pub mod runner;
pub mod statement;

pub use context::Context;
pub use error::EvalError;
pub use eval::{call_function, evaluate, evaluate_str};
pub use expectation::{ExpectationOutcome, check_expectation, check_str};
pub use runner::{Phase, TestOutcome, TestResult, run_test};
pub use statement::{execute_statement, execute_str};
