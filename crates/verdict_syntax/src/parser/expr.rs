use verdict_core::numeric::parse_number;

use crate::ast::Expr;

/// Parse one expression.
///
/// Forms are tried in a fixed order against the trimmed text:
/// 1. numeric literal,
/// 2. `true` / `false`,
/// 3. `"..."` (every leading and trailing quote is stripped),
/// 4. call: contains `(` and ends with `)`,
/// 5. property access: contains `.`,
/// 6. bare variable.
///
/// ## Notes
/// - Call arguments are split on **every** comma, so a nested call with several arguments
///   (`add(multiply(2, 3), 1)`) does not parse as intended.
/// - An empty argument list (`now()`) is a call with zero arguments.
///
/// ## Examples
/// ```rust
/// use verdict_syntax::ast::Expr;
/// use verdict_syntax::parser::parse_expression;
///
/// assert_eq!(parse_expression(" 42 "), Expr::Number(42.0));
/// assert_eq!(parse_expression(r#""hi""#), Expr::Str("hi".into()));
/// assert_eq!(
///     parse_expression("user.address.city"),
///     Expr::Property { root: "user".into(), path: vec!["address".into(), "city".into()] }
/// );
/// ```
pub fn parse_expression(text: &str) -> Expr {
    let text = text.trim();

    if let Some(n) = parse_number(text) {
        return Expr::Number(n);
    }
    match text {
        "true" => return Expr::Bool(true),
        "false" => return Expr::Bool(false),
        _ => {}
    }
    if text.starts_with('"') && text.ends_with('"') {
        return Expr::Str(text.trim_matches('"').to_string());
    }
    if text.ends_with(')') {
        if let Some(open) = text.find('(') {
            return parse_call(text, open);
        }
    }
    if let Some((root, rest)) = text.split_once('.') {
        return Expr::Property {
            root: root.trim().to_string(),
            path: split_path(rest),
        };
    }
    Expr::Var(text.to_string())
}

fn parse_call(text: &str, open: usize) -> Expr {
    let name = text[..open].trim().to_string();
    let inner = text.get(open + 1..text.len() - 1).unwrap_or("").trim();
    let args = if inner.is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(parse_expression).collect()
    };
    Expr::Call { name, args }
}

/// Split a dotted property path into trimmed segments (`"a . b.c"` → `["a", "b", "c"]`).
pub fn split_path(path: &str) -> Vec<String> {
    path.split('.').map(|segment| segment.trim().to_string()).collect()
}
