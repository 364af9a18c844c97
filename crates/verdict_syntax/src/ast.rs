//! AST for the three embedded mini-grammars.

use verdict_core::lang::operators::AssertOpId;

/// A parsed expression.
///
/// ## Notes
/// - Parsing never fails: anything that is not a literal, a call or a property access is a variable reference,
///   and an unknown variable is an evaluation error, not a syntax error.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Bool(bool),
    /// Double-quoted literal with the quotes stripped (no escape processing).
    Str(String),
    /// `name(arg, ...)`. `name` may contain dots (`math.hypot(3, 4)`); it is resolved by the function registry.
    Call { name: String, args: Vec<Expr> },
    /// `root.path[0].path[1]...`
    Property { root: String, path: Vec<String> },
    Var(String),
}

/// Where a statement writes its value.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Variable(String),
    /// Nested write into an existing object: `root.path[0]...path[n-1]`. `path` is never empty.
    Property { root: String, path: Vec<String> },
}

impl Target {
    /// Name of the context binding the statement reads or writes.
    pub fn root(&self) -> &str {
        match self {
            Target::Variable(name) => name,
            Target::Property { root, .. } => root,
        }
    }
}

/// A parsed `target = expression` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub target: Target,
    pub value: Expr,
}

/// A parsed `expect: left <op> right` assertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    pub op: AssertOpId,
    pub left: Expr,
    pub right: Expr,
}
