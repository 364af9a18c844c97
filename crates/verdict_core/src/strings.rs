//! Define shared string semantics for textual assertions and the string built-ins.
//!
//! ## Notes
//! - Everything operates on canonical string forms ([`crate::Value`]'s `Display`).
//! - Case mapping is Unicode-aware (`str::to_uppercase`).

use crate::value::Value;

/// Check whether `needle` occurs in `haystack`.
pub fn str_contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

pub fn str_starts_with(haystack: &str, prefix: &str) -> bool {
    haystack.starts_with(prefix)
}

pub fn str_ends_with(haystack: &str, suffix: &str) -> bool {
    haystack.ends_with(suffix)
}

/// Join the canonical string forms of `values` with no separator.
///
/// ## Examples
/// ```rust
/// use verdict_core::{Value, strings::concat_all};
///
/// let parts = [Value::from("n="), Value::Number(3.0), Value::Bool(true)];
/// assert_eq!(concat_all(&parts), "n=3true");
/// ```
pub fn concat_all(values: &[Value]) -> String {
    values.iter().map(Value::canonical_string).collect()
}

pub fn upper(value: &Value) -> String {
    value.canonical_string().to_uppercase()
}

pub fn lower(value: &Value) -> String {
    value.canonical_string().to_lowercase()
}
