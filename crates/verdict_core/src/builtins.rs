//! Built-in function semantics.
//!
//! [`apply`] validates arity and argument kinds from the registry ([`crate::lang::builtins`]) and then computes the
//! result. All arithmetic is IEEE `f64`; only division by zero and the square root of a negative number are
//! reported as errors, everything else (overflow to infinity, `power(-8, 1/3)` producing NaN) follows float rules.

use thiserror::Error;

use crate::lang::builtins::{self, ArgKind, Arity, BuiltinFnId};
use crate::strings;
use crate::value::Value;

pub const DIVISION_BY_ZERO_MSG: &str = "division by zero";
pub const NEGATIVE_SQRT_MSG: &str = "cannot be called with negative number";
pub const MUST_BE_NUMBER_MSG: &str = "must be a number";
pub const MUST_BE_NUMBERS_MSG: &str = "must be numbers";

/// Represent a built-in call that could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuiltinError {
    /// Wrong number or kind of arguments; `reason` completes the sentence `"<function>() <reason>"`.
    #[error("{function}() {reason}")]
    InvalidArguments { function: &'static str, reason: String },
    #[error("{}", DIVISION_BY_ZERO_MSG)]
    DivisionByZero,
    #[error("{function}() {}", NEGATIVE_SQRT_MSG)]
    NegativeArgument { function: &'static str },
}

/// Apply a built-in function to already-evaluated arguments.
///
/// ## Parameters
/// - `id`: which built-in to run.
/// - `args`: evaluated arguments, in call order.
///
/// ## Returns
/// - The result value, or a [`BuiltinError`] naming the function.
///
/// ## Examples
/// ```rust
/// use verdict_core::builtins::{BuiltinError, apply};
/// use verdict_core::lang::builtins::BuiltinFnId;
/// use verdict_core::Value;
///
/// assert_eq!(apply(BuiltinFnId::Add, &[Value::Number(2.0), Value::Number(3.0)]), Ok(Value::Number(5.0)));
/// assert_eq!(
///     apply(BuiltinFnId::Divide, &[Value::Number(1.0), Value::Number(0.0)]),
///     Err(BuiltinError::DivisionByZero)
/// );
/// ```
pub fn apply(id: BuiltinFnId, args: &[Value]) -> Result<Value, BuiltinError> {
    let info = builtins::info_for(id);
    let function = info.canonical();

    if !info.arity.accepts(args.len()) {
        return Err(BuiltinError::InvalidArguments {
            function,
            reason: format!("requires {}", info.arity.describe()),
        });
    }

    match info.args {
        ArgKind::Numbers => {
            let nums = numbers(function, info.arity, args)?;
            apply_numeric(id, function, &nums)
        }
        ArgKind::Any => Ok(apply_textual(id, args)),
    }
}

fn numbers(function: &'static str, arity: Arity, args: &[Value]) -> Result<Vec<f64>, BuiltinError> {
    args.iter()
        .map(|arg| arg.as_number())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| BuiltinError::InvalidArguments {
            function,
            reason: match arity {
                Arity::Exactly(1) => format!("argument {MUST_BE_NUMBER_MSG}"),
                _ => format!("arguments {MUST_BE_NUMBERS_MSG}"),
            },
        })
}

fn apply_numeric(id: BuiltinFnId, function: &'static str, nums: &[f64]) -> Result<Value, BuiltinError> {
    let result = match (id, nums) {
        (BuiltinFnId::Add, [a, b]) => a + b,
        (BuiltinFnId::Subtract, [a, b]) => a - b,
        (BuiltinFnId::Multiply, [a, b]) => a * b,
        (BuiltinFnId::Divide, [_, b]) if *b == 0.0 => return Err(BuiltinError::DivisionByZero),
        (BuiltinFnId::Divide, [a, b]) => a / b,
        (BuiltinFnId::Power, [a, b]) => a.powf(*b),
        (BuiltinFnId::Sqrt, [x]) if *x < 0.0 => return Err(BuiltinError::NegativeArgument { function }),
        (BuiltinFnId::Sqrt, [x]) => x.sqrt(),
        (BuiltinFnId::Abs, [x]) => x.abs(),
        (BuiltinFnId::Min, [a, b]) => a.min(*b),
        (BuiltinFnId::Max, [a, b]) => a.max(*b),
        (BuiltinFnId::CelsiusToFahrenheit, [c]) => c * 9.0 / 5.0 + 32.0,
        _ => {
            return Err(BuiltinError::InvalidArguments {
                function,
                reason: "cannot be applied to these arguments".to_string(),
            });
        }
    };
    Ok(Value::Number(result))
}

fn apply_textual(id: BuiltinFnId, args: &[Value]) -> Value {
    match (id, args) {
        (BuiltinFnId::ToUpper, [value]) => Value::Str(strings::upper(value)),
        (BuiltinFnId::ToLower, [value]) => Value::Str(strings::lower(value)),
        _ => Value::Str(strings::concat_all(args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(apply(BuiltinFnId::Subtract, &[n(10.0), n(4.0)]), Ok(n(6.0)));
        assert_eq!(apply(BuiltinFnId::Multiply, &[n(2.5), n(4.0)]), Ok(n(10.0)));
        assert_eq!(apply(BuiltinFnId::Divide, &[n(9.0), n(2.0)]), Ok(n(4.5)));
        assert_eq!(apply(BuiltinFnId::Power, &[n(2.0), n(10.0)]), Ok(n(1024.0)));
        assert_eq!(apply(BuiltinFnId::Sqrt, &[n(16.0)]), Ok(n(4.0)));
        assert_eq!(apply(BuiltinFnId::Abs, &[n(-3.0)]), Ok(n(3.0)));
        assert_eq!(apply(BuiltinFnId::Min, &[n(1.0), n(2.0)]), Ok(n(1.0)));
        assert_eq!(apply(BuiltinFnId::Max, &[n(1.0), n(2.0)]), Ok(n(2.0)));
        assert_eq!(apply(BuiltinFnId::CelsiusToFahrenheit, &[n(100.0)]), Ok(n(212.0)));
    }

    #[test]
    fn test_divide_by_zero() {
        let err = apply(BuiltinFnId::Divide, &[n(1.0), n(0.0)]).unwrap_err();
        assert_eq!(err, BuiltinError::DivisionByZero);
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn test_sqrt_negative() {
        let err = apply(BuiltinFnId::Sqrt, &[n(-1.0)]).unwrap_err();
        assert_eq!(err, BuiltinError::NegativeArgument { function: "sqrt" });
        assert_eq!(err.to_string(), "sqrt() cannot be called with negative number");
    }

    #[test]
    fn test_arity_errors_name_the_function() {
        let err = apply(BuiltinFnId::Add, &[n(1.0)]).unwrap_err();
        assert_eq!(err.to_string(), "add() requires 2 arguments");
        let err = apply(BuiltinFnId::Concat, &[Value::from("a")]).unwrap_err();
        assert_eq!(err.to_string(), "concat() requires at least 2 arguments");
        let err = apply(BuiltinFnId::ToUpper, &[]).unwrap_err();
        assert_eq!(err.to_string(), "toUpper() requires 1 argument");
    }

    #[test]
    fn test_type_errors_name_the_function() {
        let err = apply(BuiltinFnId::Add, &[n(1.0), Value::from("2")]).unwrap_err();
        assert_eq!(err.to_string(), "add() arguments must be numbers");
        let err = apply(BuiltinFnId::Abs, &[Value::Bool(true)]).unwrap_err();
        assert_eq!(err.to_string(), "abs() argument must be a number");
    }

    #[test]
    fn test_string_builtins() {
        let out = apply(BuiltinFnId::Concat, &[Value::from("Hello, "), Value::from("World"), n(1.0)]);
        assert_eq!(out, Ok(Value::from("Hello, World1")));
        assert_eq!(apply(BuiltinFnId::ToUpper, &[Value::from("abc")]), Ok(Value::from("ABC")));
        assert_eq!(apply(BuiltinFnId::ToLower, &[n(5.0)]), Ok(Value::from("5")));
    }
}
