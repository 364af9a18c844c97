use verdict_core::lang::operators::{self, AssertOpId};

use crate::ast::Expectation;
use crate::diagnostics::SyntaxError;

use super::expr::parse_expression;

/// Prefix every assertion must start with (after trimming).
pub const EXPECT_PREFIX: &str = "expect:";

/// Parse an `expect: left <op> right` assertion.
///
/// The operator is the first one, **in registry priority order**, whose spelling occurs anywhere in the body.
/// Splitting on that spelling must yield exactly two operands.
///
/// ## Errors
/// - [`SyntaxError::MissingExpectPrefix`] when the prefix is missing.
/// - [`SyntaxError::NoOperator`] when no operator occurs in the body.
/// - [`SyntaxError::AmbiguousOperator`] when the chosen operator occurs more than once.
///
/// ## Examples
/// ```rust
/// use verdict_core::lang::operators::AssertOpId;
/// use verdict_syntax::parser::parse_expectation;
///
/// let e = parse_expectation("expect: url startsWith \"https://\"").unwrap();
/// assert_eq!(e.op, AssertOpId::StartsWith);
/// ```
pub fn parse_expectation(text: &str) -> Result<Expectation, SyntaxError> {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix(EXPECT_PREFIX) else {
        return Err(SyntaxError::MissingExpectPrefix { text: trimmed.to_string() });
    };
    let body = body.trim();

    let Some(op) = operators::find_in(body) else {
        return Err(SyntaxError::NoOperator { text: body.to_string() });
    };
    split_operands(op, body)
}

fn split_operands(op: AssertOpId, body: &str) -> Result<Expectation, SyntaxError> {
    let info = operators::info_for(op);
    let mut parts = body.split(info.search);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => Ok(Expectation {
            op,
            left: parse_expression(left),
            right: parse_expression(right),
        }),
        _ => Err(SyntaxError::AmbiguousOperator {
            op: info.item.canonical,
            text: body.to_string(),
        }),
    }
}
