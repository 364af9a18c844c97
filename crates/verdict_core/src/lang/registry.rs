//! Shareable metadata for `verdict_core::lang` registries.
//!
//! The `verdict_core::lang` module is a set of **registry-first** vocabularies: built-in functions and assertion
//! operators. This submodule provides the small, dependency-free metadata type reused by both registries.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for dispatch and diagnostics; the mini-grammar parsers still own the syntax rules.

/// Shared metadata shape for registry-first vocabulary items.
///
/// Registries that need extra per-item data (arity for built-ins, search spelling for operators) wrap this struct
/// in an extension info type.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
}
