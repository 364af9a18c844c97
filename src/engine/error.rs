//! Evaluation errors.

use thiserror::Error;
use verdict_core::builtins::BuiltinError;
use verdict_core::compare::CompareError;
use verdict_core::errors::{
    DIVISION_BY_ZERO_MSG, EXTERNAL_FUNCTION_FAILED_MSG, NEGATIVE_SQRT_MSG, STRING_RELATIONAL_MSG, UNDEFINED_VARIABLE_MSG,
    UNKNOWN_FUNCTION_MSG,
};
use verdict_core::lang::operators::{self, AssertOpId};
use verdict_syntax::SyntaxError;

use crate::bridge::BridgeError;

/// Whether a property was being read or written when it hit a non-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAction {
    Access,
    Set,
}

impl PropertyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyAction::Access => "access",
            PropertyAction::Set => "set",
        }
    }
}

/// Everything that can go wrong while evaluating an expression, statement or expectation.
///
/// Every variant renders a non-empty message.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("{}: {name}", UNDEFINED_VARIABLE_MSG)]
    UndefinedVariable { name: String },

    #[error("property not found: {property}")]
    PropertyNotFound { property: String },

    #[error("cannot {} property {property} on non-object type {found}", action.as_str())]
    NotAnObject {
        property: String,
        found: &'static str,
        action: PropertyAction,
    },

    #[error("{function}() {reason}")]
    InvalidArguments { function: &'static str, reason: String },

    #[error("{}", DIVISION_BY_ZERO_MSG)]
    DivisionByZero,

    #[error("{function}() {}", NEGATIVE_SQRT_MSG)]
    NegativeArgument { function: &'static str },

    #[error("{}: {name} (not a built-in, no external modules configured)", UNKNOWN_FUNCTION_MSG)]
    UnknownFunction { name: String },

    #[error("{} {function}() failed: {source}", EXTERNAL_FUNCTION_FAILED_MSG)]
    External {
        function: String,
        #[source]
        source: BridgeError,
    },

    #[error(transparent)]
    MalformedExpectation(SyntaxError),

    #[error(transparent)]
    MalformedStatement(SyntaxError),

    #[error("operator {} {}", operators::as_str(*op), STRING_RELATIONAL_MSG)]
    UnsupportedStringComparison { op: AssertOpId },
}

impl From<BuiltinError> for EvalError {
    fn from(err: BuiltinError) -> Self {
        match err {
            BuiltinError::InvalidArguments { function, reason } => EvalError::InvalidArguments { function, reason },
            BuiltinError::DivisionByZero => EvalError::DivisionByZero,
            BuiltinError::NegativeArgument { function } => EvalError::NegativeArgument { function },
        }
    }
}

impl From<CompareError> for EvalError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::UnsupportedStringComparison { op } => EvalError::UnsupportedStringComparison { op },
        }
    }
}

impl From<SyntaxError> for EvalError {
    fn from(err: SyntaxError) -> Self {
        if err.is_expectation() {
            EvalError::MalformedExpectation(err)
        } else {
            EvalError::MalformedStatement(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EvalError::UndefinedVariable { name: "x".into() }.to_string(),
            "undefined variable: x"
        );
        assert_eq!(
            EvalError::NotAnObject {
                property: "name".into(),
                found: "number",
                action: PropertyAction::Set,
            }
            .to_string(),
            "cannot set property name on non-object type number"
        );
        assert_eq!(
            EvalError::UnsupportedStringComparison { op: AssertOpId::Gt }.to_string(),
            "operator > not supported for strings"
        );
        assert_eq!(
            EvalError::UnknownFunction { name: "frob".into() }.to_string(),
            "unknown function: frob (not a built-in, no external modules configured)"
        );
    }

    #[test]
    fn test_builtin_errors_convert() {
        let err: EvalError = BuiltinError::DivisionByZero.into();
        assert_eq!(err.to_string(), "division by zero");
        let err: EvalError = BuiltinError::NegativeArgument { function: "sqrt" }.into();
        assert_eq!(err.to_string(), "sqrt() cannot be called with negative number");
    }

    #[test]
    fn test_syntax_errors_are_routed_by_grammar() {
        let err: EvalError = SyntaxError::MalformedStatement { text: "x".into() }.into();
        assert!(matches!(err, EvalError::MalformedStatement(_)));
        let err: EvalError = SyntaxError::NoOperator { text: "x".into() }.into();
        assert!(matches!(err, EvalError::MalformedExpectation(_)));
    }
}
