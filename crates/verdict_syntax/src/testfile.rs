//! YAML test-file model and loader.
//!
//! Two shapes are accepted:
//!
//! ```yaml
//! # map form: one key per test
//! adds two numbers:
//!   confidence: 0.95
//!   given: { a: 2, b: 3 }
//!   when:
//!     - result = add(a, b)
//!   then:
//!     - expect: result == 5
//! ```
//!
//! ```yaml
//! # legacy form: a single test under `test:`
//! test:
//!   name: adds two numbers
//!   when: ["result = add(2, 3)"]
//!   then: ["expect: result == 5"]
//! ```
//!
//! ## Notes
//! - Tests keep file order.
//! - In the map form, entries with neither `when` nor `then` (and entries that are not mappings) are metadata and
//!   are skipped.
//! - A step written without quotes as `- expect: result == 5` is a one-key YAML mapping; it is folded back into
//!   the string `"expect: result == 5"`.
//! - Confidence defaults to `1.0` when absent or zero.

use std::path::{Path, PathBuf};

use miette::NamedSource;
use serde::Deserialize;
use serde_yaml::{Mapping, Value as Yaml};

use crate::diagnostics::{TestFileError, key_span, yaml_span};

/// Key that marks the legacy single-test shape.
pub const LEGACY_KEY: &str = "test";

const DEFAULT_CONFIDENCE: f64 = 1.0;

/// A parsed test file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestFile {
    pub path: PathBuf,
    pub tests: Vec<TestCase>,
}

/// One declarative test: given bindings, ordered statements, ordered assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub confidence: f64,
    /// Setup bindings in file order. Values are plain JSON so every run builds fresh, unshared objects.
    pub given: Vec<(String, serde_json::Value)>,
    pub when: Vec<String>,
    pub then: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    given: Option<Mapping>,
    #[serde(default)]
    when: Vec<Yaml>,
    #[serde(default)]
    then: Vec<Yaml>,
}

impl RawTest {
    fn is_metadata(&self) -> bool {
        self.when.is_empty() && self.then.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct LegacyFile {
    test: RawTest,
}

/// Parse test-file source text.
///
/// ## Parameters
/// - `path`: used for diagnostics and stored on the result; nothing is read from disk.
/// - `source`: the YAML text.
///
/// ## Errors
/// - [`TestFileError`] for invalid YAML, an unsupported shape, or a test missing its name, `when` or `then`.
#[tracing::instrument(skip_all, fields(path = %path.display(), source_len = source.len()))]
pub fn parse_test_source(path: &Path, source: &str) -> Result<TestFile, TestFileError> {
    let loader = Loader { path, source };
    let doc: Yaml = serde_yaml::from_str(source).map_err(|err| loader.yaml_error(&err))?;

    let tests = match doc {
        Yaml::Mapping(map) if map.contains_key(LEGACY_KEY) => {
            let legacy: LegacyFile =
                serde_yaml::from_value(Yaml::Mapping(map)).map_err(|err| loader.yaml_error(&err))?;
            vec![loader.legacy_test(legacy.test)?]
        }
        Yaml::Mapping(map) => loader.map_form(map)?,
        _ => return Err(TestFileError::NotAMapping { src: loader.named() }),
    };

    tracing::debug!(tests = tests.len(), "parsed test file");
    Ok(TestFile {
        path: path.to_path_buf(),
        tests,
    })
}

struct Loader<'a> {
    path: &'a Path,
    source: &'a str,
}

impl Loader<'_> {
    fn named(&self) -> NamedSource<String> {
        NamedSource::new(self.path.display().to_string(), self.source.to_string())
    }

    fn yaml_error(&self, err: &serde_yaml::Error) -> TestFileError {
        TestFileError::Yaml {
            message: err.to_string(),
            src: self.named(),
            span: yaml_span(err),
        }
    }

    fn map_form(&self, map: Mapping) -> Result<Vec<TestCase>, TestFileError> {
        let mut tests = Vec::new();
        for (key, value) in map {
            let Some(name) = scalar_text(&key) else { continue };
            if !matches!(value, Yaml::Mapping(_)) {
                continue;
            }
            let raw: RawTest = serde_yaml::from_value(value).map_err(|err| self.yaml_error(&err))?;
            if raw.is_metadata() {
                continue;
            }
            tests.push(self.build(name, raw)?);
        }
        if tests.is_empty() {
            return Err(TestFileError::NoTests { src: self.named() });
        }
        Ok(tests)
    }

    fn legacy_test(&self, mut raw: RawTest) -> Result<TestCase, TestFileError> {
        let name = raw.name.take().map(|n| n.trim().to_string()).unwrap_or_default();
        self.build(name, raw)
    }

    fn build(&self, name: String, raw: RawTest) -> Result<TestCase, TestFileError> {
        let span = key_span(self.source, if name.is_empty() { LEGACY_KEY } else { &name });
        if name.is_empty() {
            return Err(TestFileError::MissingName { src: self.named(), span });
        }
        if raw.when.is_empty() {
            return Err(TestFileError::MissingWhen { name, src: self.named(), span });
        }
        if raw.then.is_empty() {
            return Err(TestFileError::MissingThen { name, src: self.named(), span });
        }

        let invalid = |field: &'static str, message: String| TestFileError::InvalidField {
            name: name.clone(),
            field,
            message,
            src: self.named(),
            span,
        };

        let when = steps(raw.when).map_err(|m| invalid("when", m))?;
        let then = steps(raw.then).map_err(|m| invalid("then", m))?;
        let given = given_bindings(raw.given.unwrap_or_default()).map_err(|m| invalid("given", m))?;
        let confidence = match raw.confidence {
            None => DEFAULT_CONFIDENCE,
            Some(c) if c == 0.0 => DEFAULT_CONFIDENCE,
            Some(c) => c,
        };

        Ok(TestCase {
            name,
            confidence,
            given,
            when,
            then,
        })
    }
}

fn steps(items: Vec<Yaml>) -> Result<Vec<String>, String> {
    items.into_iter().map(step_text).collect()
}

fn step_text(item: Yaml) -> Result<String, String> {
    if let Some(text) = scalar_text(&item) {
        return Ok(text);
    }
    if let Yaml::Mapping(map) = &item {
        if let [(k, v)] = map.iter().collect::<Vec<_>>()[..] {
            if let (Some(k), Some(v)) = (scalar_text(k), scalar_text(v)) {
                return Ok(format!("{k}: {v}"));
            }
        }
    }
    Err(format!("expected a string step, found {}", describe(&item)))
}

fn given_bindings(map: Mapping) -> Result<Vec<(String, serde_json::Value)>, String> {
    map.into_iter()
        .map(|(key, value)| {
            let key = scalar_text(&key)
                .ok_or_else(|| format!("variable names must be strings, found {}", describe(&key)))?;
            let value = serde_json::to_value(&value).map_err(|err| format!("`{key}`: {err}"))?;
            Ok((key, value))
        })
        .collect()
}

fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<TestFile, TestFileError> {
        parse_test_source(Path::new("math.verdict"), src)
    }

    #[test]
    fn test_map_form_keeps_file_order() {
        let file = parse(
            r#"
second:
  when: ["x = 1"]
  then: ["expect: x == 1"]
first:
  confidence: 0.9
  given:
    a: 2
    user: { name: Alice }
  when:
    - "result = add(a, 3)"
  then:
    - "expect: result == 5"
"#,
        )
        .unwrap();
        let names: Vec<_> = file.tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
        assert_eq!(file.tests[0].confidence, 1.0);
        assert_eq!(file.tests[1].confidence, 0.9);
        assert_eq!(file.tests[1].given[0], ("a".to_string(), serde_json::json!(2)));
        assert_eq!(file.tests[1].given[1].1, serde_json::json!({"name": "Alice"}));
    }

    #[test]
    fn test_unquoted_expect_step_is_folded_back() {
        let file = parse("t:\n  when:\n    - result = add(2, 3)\n  then:\n    - expect: result == 5\n").unwrap();
        assert_eq!(file.tests[0].when, ["result = add(2, 3)"]);
        assert_eq!(file.tests[0].then, ["expect: result == 5"]);
    }

    #[test]
    fn test_metadata_entries_are_skipped() {
        let file = parse("version: 1\nabout:\n  owner: me\nt:\n  when: [\"x = 1\"]\n  then: [\"expect: x == 1\"]\n").unwrap();
        assert_eq!(file.tests.len(), 1);
    }

    #[test]
    fn test_legacy_form() {
        let file = parse(
            "test:\n  name: \"example test\"\n  confidence: 0.95\n  given:\n    x: 5\n  when:\n    - \"result = add(x, 3)\"\n  then:\n    - \"expect: result == 8\"\n",
        )
        .unwrap();
        assert_eq!(file.tests.len(), 1);
        assert_eq!(file.tests[0].name, "example test");
        assert_eq!(file.tests[0].confidence, 0.95);
    }

    #[test]
    fn test_legacy_form_requires_a_name() {
        let err = parse("test:\n  when: [\"x = 1\"]\n  then: [\"expect: x == 1\"]\n").unwrap_err();
        assert!(matches!(err, TestFileError::MissingName { .. }));
    }

    #[test]
    fn test_missing_then_is_rejected() {
        let err = parse("t:\n  when: [\"x = 1\"]\n").unwrap_err();
        assert_eq!(err.to_string(), "test 't' must have 'then' assertions");
    }

    #[test]
    fn test_zero_confidence_defaults() {
        let file = parse("t:\n  confidence: 0\n  when: [\"x = 1\"]\n  then: [\"expect: x == 1\"]\n").unwrap();
        assert_eq!(file.tests[0].confidence, 1.0);
    }

    #[test]
    fn test_empty_or_scalar_documents() {
        assert!(matches!(parse("just text").unwrap_err(), TestFileError::NotAMapping { .. }));
        assert!(matches!(parse("meta: 1\n").unwrap_err(), TestFileError::NoTests { .. }));
    }

    #[test]
    fn test_invalid_yaml_reports_location() {
        let err = parse("t:\n  when: [\"x = 1\"\n").unwrap_err();
        let TestFileError::Yaml { span, .. } = err else {
            panic!("expected a YAML error");
        };
        assert!(span.is_some());
    }
}
