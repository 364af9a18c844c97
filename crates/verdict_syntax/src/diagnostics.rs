//! Syntax and test-file diagnostics.
//!
//! ## Notes
//! - [`SyntaxError`] covers the string grammars. It carries the offending text only; the engine adds the phase
//!   prefix (`Failed to execute statement '...'`).
//! - [`TestFileError`] covers YAML loading. Every variant carries the file source so `miette` can render the
//!   offending location when one is known.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// An embedded statement or expectation that does not fit its grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    #[error("expectation must start with 'expect:': {text}")]
    #[diagnostic(code(verdict::syntax::expect_prefix), help("write assertions as `expect: <left> <op> <right>`"))]
    MissingExpectPrefix { text: String },

    #[error("invalid {op} expectation: {text}")]
    #[diagnostic(
        code(verdict::syntax::ambiguous_operator),
        help("an assertion may contain its operator only once")
    )]
    AmbiguousOperator { op: &'static str, text: String },

    #[error("no comparison operator found in: {text}")]
    #[diagnostic(
        code(verdict::syntax::no_operator),
        help("use one of: contains, startsWith, endsWith, ==, !=, >=, <=, >, <")
    )]
    NoOperator { text: String },

    #[error("invalid statement format: {text} (expected: var = expr)")]
    #[diagnostic(code(verdict::syntax::statement), help("a statement contains exactly one `=`"))]
    MalformedStatement { text: String },
}

impl SyntaxError {
    /// Check whether this error came from the expectation grammar (as opposed to the statement grammar).
    pub fn is_expectation(&self) -> bool {
        !matches!(self, SyntaxError::MalformedStatement { .. })
    }
}

/// A test file that could not be turned into a list of tests.
#[derive(Debug, Error, Diagnostic)]
pub enum TestFileError {
    #[error("failed to parse YAML: {message}")]
    #[diagnostic(code(verdict::testfile::yaml))]
    Yaml {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("test file must be a YAML mapping of test names to tests")]
    #[diagnostic(
        code(verdict::testfile::shape),
        help("start the file with `my test name:` followed by an indented `when:`/`then:` block")
    )]
    NotAMapping {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("test must have a name")]
    #[diagnostic(code(verdict::testfile::name), help("add `name: ...` under the `test:` key"))]
    MissingName {
        #[source_code]
        src: NamedSource<String>,
        #[label("this test has no name")]
        span: Option<SourceSpan>,
    },

    #[error("test '{name}' must have 'when' statements")]
    #[diagnostic(code(verdict::testfile::when), help("add at least one `when:` statement, e.g. `result = add(2, 3)`"))]
    MissingWhen {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
    },

    #[error("test '{name}' must have 'then' assertions")]
    #[diagnostic(code(verdict::testfile::then), help("add at least one `then:` assertion, e.g. `expect: result == 5`"))]
    MissingThen {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
    },

    #[error("test '{name}' has an invalid '{field}' block: {message}")]
    #[diagnostic(
        code(verdict::testfile::field),
        help("`given` maps variable names to values; `when` and `then` are lists of strings")
    )]
    InvalidField {
        name: String,
        field: &'static str,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
    },

    #[error("no valid tests found in file")]
    #[diagnostic(code(verdict::testfile::empty), help("a test needs both `when:` and `then:`"))]
    NoTests {
        #[source_code]
        src: NamedSource<String>,
    },
}

/// Build a zero-length span at a YAML error location.
pub(crate) fn yaml_span(err: &serde_yaml::Error) -> Option<SourceSpan> {
    err.location().map(|loc| SourceSpan::from((loc.index(), 0)))
}

/// Find the span of a top-level `key:` in the source, for labelling validation errors.
pub(crate) fn key_span(source: &str, key: &str) -> Option<SourceSpan> {
    let needle = format!("{key}:");
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&needle) || trimmed.starts_with(&format!("\"{key}\":")) {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, key.len())));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_span_points_at_the_key() {
        let src = "first:\n  when: []\nsecond test:\n  when: []\n";
        let span = key_span(src, "second test").unwrap();
        assert_eq!(span.offset(), 18);
        assert_eq!(span.len(), "second test".len());
        assert!(key_span(src, "missing").is_none());
    }

    #[test]
    fn test_syntax_error_messages() {
        let err = SyntaxError::MalformedStatement { text: "x == 5".into() };
        assert_eq!(err.to_string(), "invalid statement format: x == 5 (expected: var = expr)");
        assert!(!err.is_expectation());
        assert!(SyntaxError::NoOperator { text: "x".into() }.is_expectation());
    }
}
