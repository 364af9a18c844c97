//! YAML reporter with repair context for assistants.
//!
//! Each test carries its re-rendered source, the failing step and operands, pattern-based hints and a note on
//! how far the test itself can be trusted.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use verdict_syntax::TestCase;

use super::hints::{confidence_note, hints_for};
use super::{RunSummary, TestReporter, status};
use crate::engine::TestResult;

const MESSAGE_PREFIX: &str = "verdict test results with AI-friendly context. ";

#[derive(Debug, Serialize)]
struct SuggestTest {
    name: String,
    file: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    confidence: f64,
    test_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_step: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hints: Vec<&'static str>,
    confidence_note: &'static str,
}

#[derive(Serialize)]
struct SuggestDocument<'a> {
    summary: &'a RunSummary,
    tests: &'a [SuggestTest],
    message: String,
}

pub struct SuggestReporter<W: Write> {
    out: W,
    tests: Vec<SuggestTest>,
}

impl<W: Write> SuggestReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, tests: Vec::new() }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for SuggestReporter<W> {
    fn on_test_complete(&mut self, path: &Path, test: &TestCase, result: &TestResult) -> io::Result<()> {
        self.tests.push(SuggestTest {
            name: result.name.clone(),
            file: path.display().to_string(),
            status: status(result),
            error: result.error_message(),
            confidence: result.confidence,
            test_code: format_test_code(test),
            failed_step: result.failed_phase().map(|p| p.as_str()),
            actual: result.actual().map(verdict_core::json::to_json),
            expected: result.expected().map(verdict_core::json::to_json),
            hints: hints_for(result),
            confidence_note: confidence_note(result.confidence),
        });
        Ok(())
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let document = SuggestDocument {
            summary,
            tests: &self.tests,
            message: guidance(summary),
        };
        serde_yaml::to_writer(&mut self.out, &document).map_err(io::Error::other)?;
        self.out.flush()
    }
}

fn guidance(summary: &RunSummary) -> String {
    if summary.has_failures() {
        format!(
            "{MESSAGE_PREFIX}Found {} failing test(s). Review the hints for pattern-based suggestions. For each \
             failed test, check the test_code, failed_step, actual, expected, and hints fields. The \
             confidence_note provides guidance on whether the test or implementation is more likely to be wrong.",
            summary.failed
        )
    } else {
        format!("{MESSAGE_PREFIX}All tests passed! ")
    }
}

/// Re-render a test in its map-form source shape.
pub fn format_test_code(test: &TestCase) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\"{}\":", test.name);
    if test.confidence > 0.0 {
        let _ = writeln!(out, "  confidence: {:.2}", test.confidence);
    }
    if !test.given.is_empty() {
        out.push_str("  given:\n");
        for (name, value) in &test.given {
            let _ = writeln!(out, "    {name}: {}", verdict_core::json::from_json(value));
        }
    }
    for (label, steps) in [("when", &test.when), ("then", &test.then)] {
        if steps.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {label}:");
        for step in steps {
            let _ = writeln!(out, "    - \"{step}\"");
        }
    }
    out
}
