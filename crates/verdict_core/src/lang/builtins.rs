//! Built-in function vocabulary.
//!
//! This module defines the canonical set of built-in functions the evaluator dispatches before falling back to an
//! external bridge. Callers should use the stable identifier [`BuiltinFnId`] for identity and query spellings,
//! arity and other metadata through [`BuiltinFnInfo`] / [`BUILTIN_FUNCTIONS`].
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact: `toupper` is not a built-in and goes to the bridge.
//! - The arithmetic itself lives in [`crate::builtins`]; this module is metadata only.
//!
//! ## Examples
//! ```rust
//! use verdict_core::lang::builtins::{self, Arity, BuiltinFnId};
//!
//! assert_eq!(builtins::from_str("add"), Some(BuiltinFnId::Add));
//! assert_eq!(builtins::info_for(BuiltinFnId::Concat).arity, Arity::AtLeast(2));
//! assert_eq!(builtins::from_str("ADD"), None);
//! ```

use super::registry::LangItemInfo;

/// Stable identifier for a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFnId {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Abs,
    Min,
    Max,

    // Strings
    Concat,
    ToUpper,
    ToLower,

    // Conversions
    CelsiusToFahrenheit,
}

/// How many arguments a built-in accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Check whether `count` arguments satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    /// Render the requirement for diagnostics (`"2 arguments"`, `"at least 2 arguments"`).
    pub fn describe(self) -> String {
        match self {
            Arity::Exactly(1) => "1 argument".to_string(),
            Arity::Exactly(n) => format!("{n} arguments"),
            Arity::AtLeast(n) => format!("at least {n} arguments"),
        }
    }
}

/// Which argument kinds a built-in accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Every argument must be a Number.
    Numbers,
    /// Any value; it is rendered with its canonical string form.
    Any,
}

/// Metadata for a built-in function.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFnInfo {
    pub item: LangItemInfo<BuiltinFnId>,
    pub arity: Arity,
    pub args: ArgKind,
}

impl BuiltinFnInfo {
    pub fn id(&self) -> BuiltinFnId {
        self.item.id
    }

    pub fn canonical(&self) -> &'static str {
        self.item.canonical
    }
}

/// Registry of all built-in functions.
pub const BUILTIN_FUNCTIONS: &[BuiltinFnInfo] = &[
    // Arithmetic
    info(BuiltinFnId::Add, "add", Arity::Exactly(2), ArgKind::Numbers),
    info(BuiltinFnId::Subtract, "subtract", Arity::Exactly(2), ArgKind::Numbers),
    info(BuiltinFnId::Multiply, "multiply", Arity::Exactly(2), ArgKind::Numbers),
    // Dividing by zero is an error.
    info(BuiltinFnId::Divide, "divide", Arity::Exactly(2), ArgKind::Numbers),
    info(BuiltinFnId::Power, "power", Arity::Exactly(2), ArgKind::Numbers),
    // Negative input is an error.
    info(BuiltinFnId::Sqrt, "sqrt", Arity::Exactly(1), ArgKind::Numbers),
    info(BuiltinFnId::Abs, "abs", Arity::Exactly(1), ArgKind::Numbers),
    info(BuiltinFnId::Min, "min", Arity::Exactly(2), ArgKind::Numbers),
    info(BuiltinFnId::Max, "max", Arity::Exactly(2), ArgKind::Numbers),
    // Strings, on canonical string forms
    info(BuiltinFnId::Concat, "concat", Arity::AtLeast(2), ArgKind::Any),
    info(BuiltinFnId::ToUpper, "toUpper", Arity::Exactly(1), ArgKind::Any),
    info(BuiltinFnId::ToLower, "toLower", Arity::Exactly(1), ArgKind::Any),
    // `c * 9 / 5 + 32`
    info(BuiltinFnId::CelsiusToFahrenheit, "celsiusToFahrenheit", Arity::Exactly(1), ArgKind::Numbers),
];

/// Return the canonical spelling for a built-in function.
pub fn as_str(id: BuiltinFnId) -> &'static str {
    info_for(id).item.canonical
}

/// Return the full metadata entry for a built-in function.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinFnId) -> &'static BuiltinFnInfo {
    BUILTIN_FUNCTIONS
        .iter()
        .find(|b| b.item.id == id)
        .expect("builtin info missing")
}

/// Resolve a spelling to a built-in function identifier.
///
/// ## Returns
/// - `Some(BuiltinFnId)` on an exact, case-sensitive match.
/// - `None` otherwise (the caller then tries the external bridge).
pub fn from_str(name: &str) -> Option<BuiltinFnId> {
    BUILTIN_FUNCTIONS
        .iter()
        .find(|b| b.item.canonical == name)
        .map(|b| b.item.id)
}

const fn info(id: BuiltinFnId, canonical: &'static str, arity: Arity, args: ArgKind) -> BuiltinFnInfo {
    BuiltinFnInfo {
        item: LangItemInfo { id, canonical },
        arity,
        args,
    }
}
