//! Assertion operator vocabulary.
//!
//! Assertions are flat `left <op> right` comparisons. The checker finds the operator by **substring search** in a
//! fixed priority order, so the order of [`ASSERT_OPERATORS`] is part of the semantics: textual operators first
//! (padded with spaces), then the two-character symbolic operators before their one-character prefixes.
//!
//! ## Notes
//! - `search` is the exact text the checker looks for (e.g. `" contains "`); `canonical` is the bare spelling used in
//!   the "expected" rendering of textual operators (`"contains https://"`).
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use verdict_core::lang::operators::{self, AssertOpId, AssertOpKind};
//!
//! assert_eq!(operators::from_str(">="), Some(AssertOpId::GtEq));
//! assert_eq!(operators::info_for(AssertOpId::StartsWith).kind, AssertOpKind::Textual);
//! assert_eq!(operators::find_in("a >= b"), Some(AssertOpId::GtEq));
//! ```

use super::registry::LangItemInfo;

/// Stable identifier for every assertion operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertOpId {
    // Textual
    Contains,
    StartsWith,
    EndsWith,

    // Symbolic
    EqEq,
    NotEq,
    GtEq,
    LtEq,
    Gt,
    Lt,
}

/// Whether an operator works on canonical strings or follows the numeric-first comparison policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertOpKind {
    Textual,
    Symbolic,
}

/// Metadata for an assertion operator.
#[derive(Debug, Clone, Copy)]
pub struct AssertOpInfo {
    pub item: LangItemInfo<AssertOpId>,
    /// Exact text searched for in the assertion body.
    pub search: &'static str,
    pub kind: AssertOpKind,
    /// Relational operators are rejected for non-numeric operands.
    pub relational: bool,
}

/// Registry of all assertion operators, **in search priority order**.
pub const ASSERT_OPERATORS: &[AssertOpInfo] = &[
    info(AssertOpId::Contains, "contains", " contains ", AssertOpKind::Textual, false),
    info(AssertOpId::StartsWith, "startsWith", " startsWith ", AssertOpKind::Textual, false),
    info(AssertOpId::EndsWith, "endsWith", " endsWith ", AssertOpKind::Textual, false),
    info(AssertOpId::EqEq, "==", "==", AssertOpKind::Symbolic, false),
    info(AssertOpId::NotEq, "!=", "!=", AssertOpKind::Symbolic, false),
    info(AssertOpId::GtEq, ">=", ">=", AssertOpKind::Symbolic, true),
    info(AssertOpId::LtEq, "<=", "<=", AssertOpKind::Symbolic, true),
    info(AssertOpId::Gt, ">", ">", AssertOpKind::Symbolic, true),
    info(AssertOpId::Lt, "<", "<", AssertOpKind::Symbolic, true),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: AssertOpId) -> &'static str {
    info_for(id).item.canonical
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: AssertOpId) -> &'static AssertOpInfo {
    ASSERT_OPERATORS
        .iter()
        .find(|o| o.item.id == id)
        .expect("assertion operator info missing")
}

/// Resolve a canonical spelling (`"startsWith"`, `"<="`) to an operator identifier.
pub fn from_str(spelling: &str) -> Option<AssertOpId> {
    ASSERT_OPERATORS
        .iter()
        .find(|o| o.item.canonical == spelling)
        .map(|o| o.item.id)
}

/// Find the first operator (in priority order) whose search text occurs in `body`.
///
/// ## Notes
/// - Priority beats position: `a < b == c` resolves to `==` because `==` is tried before `<`.
pub fn find_in(body: &str) -> Option<AssertOpId> {
    ASSERT_OPERATORS
        .iter()
        .find(|o| body.contains(o.search))
        .map(|o| o.item.id)
}

const fn info(
    id: AssertOpId,
    canonical: &'static str,
    search: &'static str,
    kind: AssertOpKind,
    relational: bool,
) -> AssertOpInfo {
    AssertOpInfo {
        item: LangItemInfo { id, canonical },
        search,
        kind,
        relational,
    }
}
