//! Comparison policy for assertion operators.
//!
//! ## Notes
//! - Textual operators (`contains`, `startsWith`, `endsWith`) always work on canonical string forms.
//! - Symbolic operators, both operands Numbers: IEEE float comparison (so `5 == 5.0001` is false and `NaN != NaN`).
//! - Otherwise `==` / `!=` compare canonical string forms, so `"5" == 5` holds and `true == "true"` holds.
//! - Relational operators on non-numbers are an error rather than a lexicographic comparison.

use thiserror::Error;

use crate::lang::operators::{self, AssertOpId, AssertOpKind};
use crate::strings;
use crate::value::Value;

/// Fragment of the message for relational operators applied to strings.
pub const STRING_RELATIONAL_MSG: &str = "not supported for strings";

/// Represent a comparison the policy refuses to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// A relational operator (`>`, `<`, `>=`, `<=`) with at least one non-numeric operand.
    #[error("operator {} {}", operators::as_str(*op), STRING_RELATIONAL_MSG)]
    UnsupportedStringComparison { op: AssertOpId },
}

/// Compare two values with an assertion operator.
///
/// ## Parameters
/// - `op`: any assertion operator.
/// - `left` / `right`: evaluated operands.
///
/// ## Returns
/// - `Ok(true)` if the comparison holds.
/// - `Err(CompareError::UnsupportedStringComparison)` for relational operators on non-numbers.
///
/// ## Examples
/// ```rust
/// use verdict_core::{Value, compare};
/// use verdict_core::lang::operators::AssertOpId;
///
/// assert_eq!(compare(AssertOpId::EqEq, &Value::Number(5.0), &Value::Number(5.0)), Ok(true));
/// assert_eq!(compare(AssertOpId::EqEq, &Value::from("5"), &Value::Number(5.0)), Ok(true));
/// assert!(compare(AssertOpId::Gt, &Value::from("b"), &Value::from("a")).is_err());
/// ```
pub fn compare(op: AssertOpId, left: &Value, right: &Value) -> Result<bool, CompareError> {
    let info = operators::info_for(op);

    if info.kind == AssertOpKind::Textual {
        let (l, r) = (left.canonical_string(), right.canonical_string());
        return Ok(match op {
            AssertOpId::Contains => strings::str_contains(&l, &r),
            AssertOpId::StartsWith => strings::str_starts_with(&l, &r),
            _ => strings::str_ends_with(&l, &r),
        });
    }

    if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
        return Ok(match op {
            AssertOpId::EqEq => l == r,
            AssertOpId::NotEq => l != r,
            AssertOpId::GtEq => l >= r,
            AssertOpId::LtEq => l <= r,
            AssertOpId::Gt => l > r,
            _ => l < r,
        });
    }

    if info.relational {
        return Err(CompareError::UnsupportedStringComparison { op });
    }
    let (l, r) = (left.canonical_string(), right.canonical_string());
    Ok(if op == AssertOpId::NotEq { l != r } else { l == r })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn test_numeric_comparisons() {
        assert_eq!(compare(AssertOpId::EqEq, &n(5.0), &n(5.0001)), Ok(false));
        assert_eq!(compare(AssertOpId::NotEq, &n(5.0), &n(5.0001)), Ok(true));
        assert_eq!(compare(AssertOpId::GtEq, &n(3.0), &n(3.0)), Ok(true));
        assert_eq!(compare(AssertOpId::Lt, &n(-1.0), &n(0.0)), Ok(true));
        assert_eq!(compare(AssertOpId::Gt, &n(-1.0), &n(0.0)), Ok(false));
    }

    #[test]
    fn test_string_equality_uses_canonical_form() {
        assert_eq!(compare(AssertOpId::EqEq, &Value::Bool(true), &Value::from("true")), Ok(true));
        assert_eq!(compare(AssertOpId::EqEq, &Value::from("abc"), &Value::from("abd")), Ok(false));
        assert_eq!(compare(AssertOpId::NotEq, &Value::Null, &Value::from("null")), Ok(false));
    }

    #[test]
    fn test_relational_on_strings_is_rejected() {
        let err = compare(AssertOpId::LtEq, &Value::from("a"), &n(1.0)).unwrap_err();
        assert_eq!(err, CompareError::UnsupportedStringComparison { op: AssertOpId::LtEq });
        assert_eq!(err.to_string(), "operator <= not supported for strings");
    }

    #[test]
    fn test_every_relational_operator_rejects_non_numbers() {
        for info in operators::ASSERT_OPERATORS {
            let outcome = compare(info.item.id, &Value::from("a"), &Value::from("a"));
            if info.relational {
                assert_eq!(outcome, Err(CompareError::UnsupportedStringComparison { op: info.item.id }));
            } else {
                assert!(outcome.is_ok(), "{} should accept strings", info.item.canonical);
            }
        }
    }

    #[test]
    fn test_textual_operators_use_canonical_strings() {
        assert_eq!(compare(AssertOpId::Contains, &Value::from("hello world"), &Value::from("o w")), Ok(true));
        assert_eq!(compare(AssertOpId::StartsWith, &n(12.5), &n(12.0)), Ok(true));
        assert_eq!(compare(AssertOpId::EndsWith, &Value::Bool(false), &Value::from("lse")), Ok(true));
        assert_eq!(compare(AssertOpId::StartsWith, &Value::from("http://x"), &Value::from("https://")), Ok(false));
    }
}
