//! Numeric policy: every number is an `f64`.
//!
//! ## Notes
//! - External integers are normalized to `f64` at the JSON boundary ([`crate::json`]).
//! - Integral values print without a fractional part (`5`, not `5.0`), everything else uses the shortest
//!   round-tripping decimal form.

/// Render a number in its canonical string form.
///
/// ## Examples
/// ```rust
/// use verdict_core::numeric::format_number;
///
/// assert_eq!(format_number(5.0), "5");
/// assert_eq!(format_number(0.1), "0.1");
/// assert_eq!(format_number(-3.5), "-3.5");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if n == 0.0 {
        // -0 and 0 compare equal and read the same to users.
        return "0".to_string();
    }
    n.to_string()
}

/// Check whether `n` can be sent over the wire as an integer without losing information.
pub fn is_wire_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15
}

/// Parse a numeric literal the way the expression grammar does.
///
/// ## Notes
/// - Accepts anything `f64::from_str` accepts, except the textual specials (`inf`, `nan`, `infinity`), which are
///   identifiers in the test language.
pub fn parse_number(text: &str) -> Option<f64> {
    let lowered = text.trim_start_matches(['+', '-']).to_ascii_lowercase();
    if matches!(lowered.as_str(), "inf" | "infinity" | "nan") {
        return None;
    }
    text.parse::<f64>().ok()
}
