//! Parsers for the embedded string grammars.
//!
//! Each grammar is a single function over one trimmed line of text:
//! - [`parse_expression`]: never fails,
//! - [`parse_statement`]: `target = expression`,
//! - [`parse_expectation`]: `expect: left <op> right`.

mod expectation;
mod expr;
mod statement;

pub use expectation::{EXPECT_PREFIX, parse_expectation};
pub use expr::{parse_expression, split_path};
pub use statement::parse_statement;
