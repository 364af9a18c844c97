#![forbid(unsafe_code)]
//! verdict: declarative, confidence-scored tests
//!
//! Tests are YAML files with `given` bindings, `when` statements and `then` expectations. Statements call
//! built-in functions or, through a subprocess bridge, functions implemented in Node.js, Python or Lua.
//! The expression language, values and built-ins live in `verdict_core`; the test-file grammar lives in
//! `verdict_syntax`. This crate adds the engine, the bridges, configuration, reporting and the CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `engine` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod engine;
pub mod report;
pub mod version;

pub use bridge::{Bridge, BridgeError, Runtime, SubprocessBridge};
pub use config::Config;
pub use engine::{Context, EvalError, TestOutcome, TestResult, run_test};
pub use report::{OutputFormat, RunSummary, TestReporter};
