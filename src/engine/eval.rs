//! Expression evaluation and function dispatch.
//!
//! ## Notes
//! - Evaluation never writes to the [`Context`]; the only side effects are those of external functions.
//! - Call arguments are evaluated left to right and the first error short-circuits.
//! - Dispatch order: built-in registry, then the bridge (if any), then [`EvalError::UnknownFunction`].

use verdict_core::builtins;
use verdict_core::lang::builtins as builtin_names;
use verdict_core::Value;
use verdict_syntax::ast::Expr;
use verdict_syntax::parser::parse_expression;

use super::context::Context;
use super::error::{EvalError, PropertyAction};

/// Parse and evaluate expression text.
pub fn evaluate_str(text: &str, ctx: &Context<'_>) -> Result<Value, EvalError> {
    evaluate(&parse_expression(text), ctx)
}

/// Evaluate a parsed expression against `ctx`.
pub fn evaluate(expr: &Expr, ctx: &Context<'_>) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Var(name) => lookup(name, ctx),
        Expr::Property { root, path } => resolve_path(lookup(root, ctx)?, path),
        Expr::Call { name, args } => {
            let args = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            call_function(name, &args, ctx)
        }
    }
}

/// Call a function by name with evaluated arguments.
#[tracing::instrument(level = "trace", skip(args, ctx), fields(argc = args.len()))]
pub fn call_function(name: &str, args: &[Value], ctx: &Context<'_>) -> Result<Value, EvalError> {
    if let Some(id) = builtin_names::from_str(name) {
        return Ok(builtins::apply(id, args)?);
    }
    match ctx.bridge() {
        Some(bridge) => bridge.call(name, args).map_err(|source| EvalError::External {
            function: name.to_string(),
            source,
        }),
        None => Err(EvalError::UnknownFunction { name: name.to_string() }),
    }
}

fn lookup(name: &str, ctx: &Context<'_>) -> Result<Value, EvalError> {
    ctx.get(name).ok_or_else(|| EvalError::UndefinedVariable { name: name.to_string() })
}

/// Walk `path` from `value` by object-key lookup.
pub(crate) fn resolve_path(value: Value, path: &[String]) -> Result<Value, EvalError> {
    path.iter().try_fold(value, |current, segment| step(&current, segment, PropertyAction::Access))
}

/// Read one property, reporting `action` if `current` is not an object.
pub(crate) fn step(current: &Value, segment: &str, action: PropertyAction) -> Result<Value, EvalError> {
    let Some(obj) = current.as_object() else {
        return Err(EvalError::NotAnObject {
            property: segment.to_string(),
            found: current.type_name(),
            action,
        });
    };
    obj.get(segment).ok_or_else(|| EvalError::PropertyNotFound {
        property: segment.to_string(),
    })
}
