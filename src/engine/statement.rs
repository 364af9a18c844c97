//! Statement execution (`target = expression`).

use verdict_syntax::ast::{Statement, Target};
use verdict_syntax::parser::parse_statement;

use super::context::Context;
use super::error::{EvalError, PropertyAction};
use super::eval::{evaluate, step};

/// Parse and execute statement text.
pub fn execute_str(text: &str, ctx: &mut Context<'_>) -> Result<(), EvalError> {
    let stmt = parse_statement(text)?;
    execute_statement(&stmt, ctx)
}

/// Execute a parsed statement.
///
/// ## Notes
/// - The right-hand side is evaluated before the target is inspected.
/// - For a property target every intermediate object is resolved before anything is written, so a failing
///   statement leaves the context untouched. The only write is the final key on the shared object.
/// - Intermediate segments are never created implicitly.
pub fn execute_statement(stmt: &Statement, ctx: &mut Context<'_>) -> Result<(), EvalError> {
    let value = evaluate(&stmt.value, ctx)?;

    match &stmt.target {
        Target::Variable(name) => {
            ctx.bind(name.as_str(), value);
            Ok(())
        }
        Target::Property { root, path } => {
            let Some((last, intermediate)) = path.split_last() else {
                ctx.bind(root.as_str(), value);
                return Ok(());
            };
            let root_value = ctx
                .get(root)
                .ok_or_else(|| EvalError::UndefinedVariable { name: root.clone() })?;
            if root_value.as_object().is_none() {
                let first = intermediate.first().unwrap_or(last);
                return Err(EvalError::NotAnObject {
                    property: first.clone(),
                    found: root_value.type_name(),
                    action: PropertyAction::Set,
                });
            }

            let parent = intermediate
                .iter()
                .try_fold(root_value.clone(), |current, segment| step(&current, segment, PropertyAction::Access))?;
            let Some(parent) = parent.as_object() else {
                return Err(EvalError::NotAnObject {
                    property: last.clone(),
                    found: parent.type_name(),
                    action: PropertyAction::Set,
                });
            };
            parent.insert(last.as_str(), value);

            ctx.bind(root.as_str(), root_value);
            Ok(())
        }
    }
}
