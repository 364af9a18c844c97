//! Syntax frontend for verdict test files: AST, mini-grammar parsers, YAML test-file model, diagnostics.
//!
//! A test file is YAML; inside it, three tiny grammars are embedded as plain strings:
//! - **expressions** (`add(2, 3)`, `user.name`, `"text"`),
//! - **statements** (`result = add(a, b)`, `user.address.city = "Paris"`),
//! - **expectations** (`expect: result == 5`, `expect: url startsWith "https://"`).
//!
//! ## Notes
//! - This crate is "syntax-only": it never evaluates anything and performs no IO. Callers hand it source text.
//! - The grammars are deliberately ad-hoc (substring splitting in a fixed priority order). There is no tokenizer,
//!   so string literals cannot contain `=`, `,` or operator spellings.
//! - Operator identity comes from `verdict_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use verdict_syntax::ast::Expr;
//! use verdict_syntax::parser;
//!
//! let stmt = parser::parse_statement("result = add(2, 3)").unwrap();
//! assert!(matches!(stmt.value, Expr::Call { ref name, .. } if name == "add"));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod parser;
pub mod testfile;

pub use diagnostics::{SyntaxError, TestFileError};
pub use testfile::{TestCase, TestFile, parse_test_source};
