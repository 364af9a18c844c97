//! Pattern-based hints and confidence notes for the suggest format.

use verdict_core::errors::{MUST_BE_NUMBER_MSG, MUST_BE_NUMBERS_MSG};
use verdict_core::lang::operators::{self, AssertOpId};

use crate::bridge::BridgeError;
use crate::engine::{EvalError, TestOutcome, TestResult};

const UNDEFINED_VARIABLE: &[&str] = &[
    "Check that all variables are defined in the 'given' block or assigned in 'when' statements",
    "Verify variable names match exactly (case-sensitive)",
];

const UNKNOWN_FUNCTION: &[&str] = &[
    "Ensure the function is defined in your modules (check verdict.yaml)",
    "For external functions, verify the module path is correct",
    "Check that the function is exported (for TypeScript: export function ...)",
];

const EXTERNAL_FAILURE: &[&str] = &[
    "The external function execution failed - check the implementation code",
    "Review the error output from the language runtime (Node.js/Python/Lua)",
    "Verify function arguments match the expected signature",
];

const MODULE_NOT_FOUND: &[&str] = &[
    "Module path in verdict.yaml may be incorrect",
    "For TypeScript: ensure you've run 'npm run build' to compile to JavaScript",
    "Check that the module file exists at the specified path",
];

const NOT_SERIALIZABLE: &[&str] = &[
    "Python function is returning a class instance, not a JSON-serializable value",
    "Return a dict, list, number, string, or boolean instead",
    "For complex objects, call .to_dict() or similar serialization method",
];

const BAD_ARGUMENT_LIST: &[&str] = &[
    "The Python bridge received null/None instead of a list for function arguments",
    "The function call may be malformed; check the call syntax in the test",
];

const TIMEOUT: &[&str] = &[
    "The external function did not return before the timeout - look for infinite loops or blocking I/O",
    "Raise timeout_ms in verdict.yaml if the function is legitimately slow",
];

const TYPE_MISMATCH: &[&str] = &[
    "Type mismatch detected - expected number but got a different type",
    "Ensure the function returns a number, not a string or other type",
];

const DIVISION_BY_ZERO: &[&str] = &[
    "Division by zero detected - add a check for zero before dividing",
    "Consider testing edge cases separately",
];

const FALLBACK: &[&str] = &[
    "Review the error message above for details about what went wrong",
    "Check that the test expectations match the actual behavior of the code",
];

/// Hints for a test result; empty for passing tests, never empty for failures.
pub fn hints_for(result: &TestResult) -> Vec<&'static str> {
    let mut hints: Vec<&'static str> = Vec::new();
    match &result.outcome {
        TestOutcome::Passed => return hints,
        TestOutcome::AssertionFailed { assertion, .. } => {
            if let Some(op) = operators::find_in(assertion) {
                hints.extend(assertion_hints(op));
            }
        }
        TestOutcome::Errored { error, .. } => hints.extend(error_hints(error)),
    }
    if hints.is_empty() {
        hints.extend(FALLBACK);
    }
    hints
}

fn assertion_hints(op: AssertOpId) -> &'static [&'static str] {
    match op {
        AssertOpId::EqEq => &[
            "The equality check failed - actual value doesn't match expected",
            "Consider logging the actual value to debug: add a test step that assigns it to a variable",
        ],
        AssertOpId::NotEq => &["The inequality check failed - values are actually equal"],
        AssertOpId::Gt | AssertOpId::Lt | AssertOpId::GtEq | AssertOpId::LtEq => &[
            "The numeric comparison failed - check the actual value range",
            "Ensure both sides of the comparison are numbers",
        ],
        AssertOpId::Contains => &[
            "The string doesn't contain the expected substring",
            "Check for case sensitivity - string comparisons are case-sensitive",
        ],
        AssertOpId::StartsWith => &[
            "The string doesn't start with the expected prefix",
            "Check for case sensitivity - string comparisons are case-sensitive",
        ],
        AssertOpId::EndsWith => &[
            "The string doesn't end with the expected suffix",
            "Check for case sensitivity - string comparisons are case-sensitive",
        ],
    }
}

fn error_hints(error: &EvalError) -> Vec<&'static str> {
    match error {
        EvalError::UndefinedVariable { .. } => UNDEFINED_VARIABLE.to_vec(),
        EvalError::UnknownFunction { .. } => UNKNOWN_FUNCTION.to_vec(),
        EvalError::DivisionByZero => DIVISION_BY_ZERO.to_vec(),
        EvalError::InvalidArguments { reason, .. }
            if reason.contains(MUST_BE_NUMBER_MSG) || reason.contains(MUST_BE_NUMBERS_MSG) =>
        {
            TYPE_MISMATCH.to_vec()
        }
        EvalError::External { source, .. } => bridge_hints(source),
        _ => Vec::new(),
    }
}

fn bridge_hints(error: &BridgeError) -> Vec<&'static str> {
    match error {
        BridgeError::FunctionNotFound { .. } | BridgeError::NotCallable { .. } => UNKNOWN_FUNCTION.to_vec(),
        BridgeError::Timeout { .. } => TIMEOUT.to_vec(),
        other => {
            let message = other.to_string().to_lowercase();
            let mut hints = EXTERNAL_FAILURE.to_vec();
            if ["cannot find module", "modulenotfounderror", "failed to load module"]
                .iter()
                .any(|p| message.contains(p))
            {
                hints.extend(MODULE_NOT_FOUND);
            }
            if message.contains("not json serializable") {
                hints.extend(NOT_SERIALIZABLE);
            }
            if message.contains("argument after * must be an iterable") {
                hints.extend(BAD_ARGUMENT_LIST);
            }
            if message.contains(MUST_BE_NUMBER_MSG) || message.contains(MUST_BE_NUMBERS_MSG) {
                hints.extend(TYPE_MISMATCH);
            }
            hints
        }
    }
}

/// How far to trust a test, by its confidence.
pub fn confidence_note(confidence: f64) -> &'static str {
    if confidence >= 0.95 {
        "Very high confidence - test failure likely indicates a real bug in the implementation"
    } else if confidence >= 0.85 {
        "High confidence - test is probably correct, check implementation first"
    } else if confidence >= 0.70 {
        "Moderate confidence - test may need review, verify requirements"
    } else if confidence >= 0.50 {
        "Low confidence - test is uncertain, check requirements before fixing implementation"
    } else {
        "Very low confidence - test is likely incorrect or based on unclear requirements"
    }
}
