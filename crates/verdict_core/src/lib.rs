//! Provide the pure semantic core of the verdict test engine.
//!
//! This crate is intentionally small. It contains the deterministic pieces that every other layer agrees on:
//! - the dynamically-typed [`Value`] model and its canonical string form,
//! - numeric coercion and the built-in function arithmetic,
//! - the comparison policy used by assertions (numeric first, string fallback),
//! - registry-first vocabularies for built-in functions and assertion operators.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, no subprocesses.
//! - Objects are shared by reference ([`Object`] is an `Rc` handle), so two values can alias the same mapping.
//!   Everything built on top of this crate is single-threaded per test.

pub mod builtins;
pub mod compare;
pub mod errors;
pub mod json;
pub mod lang;
pub mod numeric;
pub mod strings;
pub mod value;

pub use compare::{CompareError, compare};
pub use value::{Object, Value};
