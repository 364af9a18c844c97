//! Shared user-facing error message fragments.
//!
//! The engine renders its errors with these fragments and the suggest reporter's hint table recognises them, so
//! both sides spell each message the same way.

pub use crate::builtins::{DIVISION_BY_ZERO_MSG, MUST_BE_NUMBER_MSG, MUST_BE_NUMBERS_MSG, NEGATIVE_SQRT_MSG};
pub use crate::compare::STRING_RELATIONAL_MSG;

/// Fragment present in every undefined-variable error.
pub const UNDEFINED_VARIABLE_MSG: &str = "undefined variable";
/// Fragment present in every unknown-function error.
pub const UNKNOWN_FUNCTION_MSG: &str = "unknown function";
/// Fragment present in every failed external call.
pub const EXTERNAL_FUNCTION_FAILED_MSG: &str = "external function";
