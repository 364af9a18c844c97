//! Machine-readable JSON reporter.
//!
//! Nothing is written until the run completes; the output is a single pretty-printed document.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use verdict_syntax::TestCase;

use super::{RunSummary, TestReporter, status};
use crate::engine::TestResult;

#[derive(Debug, Serialize)]
struct JsonTest {
    name: String,
    file: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    duration_seconds: f64,
    confidence: f64,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    summary: &'a RunSummary,
    tests: &'a [JsonTest],
}

pub struct JsonReporter<W: Write> {
    out: W,
    tests: Vec<JsonTest>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, tests: Vec::new() }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for JsonReporter<W> {
    fn on_test_complete(&mut self, path: &Path, _test: &TestCase, result: &TestResult) -> io::Result<()> {
        self.tests.push(JsonTest {
            name: result.name.clone(),
            file: path.display().to_string(),
            status: status(result),
            error: result.error_message(),
            duration_seconds: result.duration.as_secs_f64(),
            confidence: result.confidence,
        });
        Ok(())
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let document = JsonDocument {
            summary,
            tests: &self.tests,
        };
        serde_json::to_writer_pretty(&mut self.out, &document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::report::SummaryBuilder;
    use crate::report::test_support::*;

    #[test]
    fn test_document_shape() {
        let mut reporter = JsonReporter::new(Vec::new());
        let path = Path::new("t/math.verdict");
        let results = [passed("adds", 1.0), assertion_failed("off by one", 0.7)];
        let mut summary = SummaryBuilder::new();
        for result in &results {
            reporter.on_test_complete(path, &case(&result.name, 1.0), result).unwrap();
            summary.record(result);
        }
        reporter.on_run_complete(&summary.finish()).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(doc["summary"]["total"], 2);
        assert_eq!(doc["summary"]["failed"], 1);
        assert_eq!(doc["summary"]["min_confidence"], 0.7);

        let tests = doc["tests"].as_array().unwrap();
        assert_eq!(tests[0]["status"], "pass");
        assert!(tests[0].get("error").is_none());
        assert_eq!(tests[0]["file"], "t/math.verdict");
        assert_eq!(tests[1]["status"], "fail");
        assert_eq!(tests[1]["error"], "Expectation failed: expect: result == 6");
        assert_eq!(tests[1]["confidence"], 0.7);
    }

    #[test]
    fn test_empty_run_is_still_a_document() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.on_run_complete(&RunSummary::default()).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(doc["tests"], serde_json::json!([]));
        assert_eq!(doc["summary"]["max_confidence"], 0.0);
    }
}
