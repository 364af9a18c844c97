//! Verdict vocabulary registries.
//!
//! This module is the front door for the tiny test language's vocabulary: built-in functions and assertion
//! operators. Callers work with **stable IDs** ([`builtins::BuiltinFnId`], [`operators::AssertOpId`]) and look up
//! spellings and metadata via registry tables, instead of matching on string literals all over the engine.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use verdict_core::lang::builtins::{self, BuiltinFnId};
//!
//! assert_eq!(builtins::from_str("celsiusToFahrenheit"), Some(BuiltinFnId::CelsiusToFahrenheit));
//! assert_eq!(builtins::as_str(BuiltinFnId::ToUpper), "toUpper");
//! ```

pub mod builtins;
pub mod operators;
pub mod registry;
