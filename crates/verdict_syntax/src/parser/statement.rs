use crate::ast::{Statement, Target};
use crate::diagnostics::SyntaxError;

use super::expr::{parse_expression, split_path};

/// Parse a `target = expression` statement.
///
/// ## Errors
/// - [`SyntaxError::MalformedStatement`] unless the text splits on `=` into exactly two parts. This rejects `==`
///   and any `=` inside a string literal.
///
/// ## Examples
/// ```rust
/// use verdict_syntax::ast::Target;
/// use verdict_syntax::parser::parse_statement;
///
/// let stmt = parse_statement("user.name = \"Bob\"").unwrap();
/// assert_eq!(stmt.target, Target::Property { root: "user".into(), path: vec!["name".into()] });
/// assert!(parse_statement("x == 5").is_err());
/// ```
pub fn parse_statement(text: &str) -> Result<Statement, SyntaxError> {
    let mut parts = text.split('=');
    let (Some(lhs), Some(rhs), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SyntaxError::MalformedStatement { text: text.to_string() });
    };

    let lhs = lhs.trim();
    let target = match lhs.split_once('.') {
        Some((root, rest)) => Target::Property {
            root: root.trim().to_string(),
            path: split_path(rest),
        },
        None => Target::Variable(lhs.to_string()),
    };

    Ok(Statement {
        target,
        value: parse_expression(rhs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    #[test]
    fn test_simple_assignment() {
        let stmt = parse_statement("result = add(2, 3)").unwrap();
        assert_eq!(stmt.target, Target::Variable("result".into()));
        assert!(matches!(stmt.value, Expr::Call { .. }));
    }

    #[test]
    fn test_nested_target() {
        let stmt = parse_statement("user.address.city = \"Paris\"").unwrap();
        assert_eq!(
            stmt.target,
            Target::Property { root: "user".into(), path: vec!["address".into(), "city".into()] }
        );
        assert_eq!(stmt.value, Expr::Str("Paris".into()));
    }

    #[test]
    fn test_malformed_statements() {
        for text in ["result", "a = b = c", "x == 1", "s = \"a=b\""] {
            assert_eq!(
                parse_statement(text),
                Err(SyntaxError::MalformedStatement { text: text.to_string() }),
                "{text}"
            );
        }
    }
}
