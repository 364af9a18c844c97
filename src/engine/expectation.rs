//! Assertion checking (`expect: left <op> right`).

use verdict_core::compare;
use verdict_core::lang::operators::{self, AssertOpKind};
use verdict_core::Value;
use verdict_syntax::ast::Expectation;
use verdict_syntax::parser::parse_expectation;

use super::context::Context;
use super::error::EvalError;
use super::eval::evaluate;

/// Outcome of one assertion that evaluated without error.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationOutcome {
    pub passed: bool,
    pub actual: Value,
    pub expected: Value,
}

/// Parse and check assertion text.
pub fn check_str(text: &str, ctx: &Context<'_>) -> Result<ExpectationOutcome, EvalError> {
    let expectation = parse_expectation(text)?;
    check_expectation(&expectation, ctx)
}

/// Check a parsed assertion.
///
/// ## Notes
/// - Operand evaluation errors propagate.
/// - For textual operators `actual` is the left operand's string form and `expected` reads `"<op> <right>"`
///   (`startsWith https://`). For symbolic operators both are the evaluated operands.
pub fn check_expectation(expectation: &Expectation, ctx: &Context<'_>) -> Result<ExpectationOutcome, EvalError> {
    let left = evaluate(&expectation.left, ctx)?;
    let right = evaluate(&expectation.right, ctx)?;
    let passed = compare(expectation.op, &left, &right)?;

    let info = operators::info_for(expectation.op);
    let outcome = match info.kind {
        AssertOpKind::Textual => ExpectationOutcome {
            passed,
            actual: Value::Str(left.canonical_string()),
            expected: Value::Str(format!("{} {}", info.item.canonical, right.canonical_string())),
        },
        AssertOpKind::Symbolic => ExpectationOutcome {
            passed,
            actual: left,
            expected: right,
        },
    };
    Ok(outcome)
}
