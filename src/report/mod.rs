//! Test result reporting.
//!
//! ## TestReporter Trait
//!
//! The runner drives a [`TestReporter`] through file and test events and never prints itself. Three reporters
//! ship with verdict:
//!
//! - [`PrettyReporter`] - colored console output (the default)
//! - [`JsonReporter`] - one JSON document for tooling
//! - [`SuggestReporter`] - one YAML document with the re-rendered test source, hints and a confidence note
//!
//! Reporters are generic over [`Write`] so tests can capture their output.

pub mod console;
pub mod hints;
pub mod json;
pub mod suggest;

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use verdict_syntax::TestCase;

pub use console::PrettyReporter;
pub use json::JsonReporter;
pub use suggest::SuggestReporter;

use crate::cli::test_interfaces::TestError;
use crate::engine::TestResult;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Suggest,
}

impl OutputFormat {
    /// Build the reporter for this format, writing to `out`.
    pub fn reporter<'w, W: Write + 'w>(self, out: W) -> Box<dyn TestReporter + 'w> {
        match self {
            OutputFormat::Pretty => Box::new(PrettyReporter::new(out)),
            OutputFormat::Json => Box::new(JsonReporter::new(out)),
            OutputFormat::Suggest => Box::new(SuggestReporter::new(out)),
        }
    }
}

/// Trait for reporting test execution results.
///
/// Implement this trait to add an output format.
pub trait TestReporter {
    /// Called instead of everything else when no test file matched `path`.
    fn on_no_files(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    /// Called once before the first file, with the number of files that will run.
    fn on_run_start(&mut self, _file_count: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called when a file loaded and its tests are about to run.
    fn on_file_start(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    /// Called when a file could not be loaded; the runner skips it.
    fn on_file_error(&mut self, _path: &Path, _error: &TestError) -> io::Result<()> {
        Ok(())
    }

    /// Called after each test.
    fn on_test_complete(&mut self, path: &Path, test: &TestCase, result: &TestResult) -> io::Result<()>;

    /// Called after the last test of a file.
    fn on_file_end(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    /// Called once with the final summary.
    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Sum of the individual test durations.
    pub duration_seconds: f64,
    pub average_confidence: f64,
    /// `0` when no test ran.
    pub min_confidence: f64,
    /// `0` when no test ran.
    pub max_confidence: f64,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Accumulates test results into a [`RunSummary`].
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    summary: RunSummary,
    confidence_sum: f64,
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self {
            summary: RunSummary {
                min_confidence: 1.0,
                ..RunSummary::default()
            },
            confidence_sum: 0.0,
        }
    }
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &TestResult) {
        let s = &mut self.summary;
        s.total += 1;
        if result.passed() {
            s.passed += 1;
        } else {
            s.failed += 1;
        }
        s.duration_seconds += result.duration.as_secs_f64();
        self.confidence_sum += result.confidence;
        s.min_confidence = s.min_confidence.min(result.confidence);
        s.max_confidence = s.max_confidence.max(result.confidence);
    }

    pub fn finish(self) -> RunSummary {
        let mut summary = self.summary;
        if summary.total > 0 {
            summary.average_confidence = self.confidence_sum / summary.total as f64;
        } else {
            summary.min_confidence = 0.0;
            summary.max_confidence = 0.0;
        }
        summary
    }
}

/// Status string used by the machine-readable formats.
pub(crate) fn status(result: &TestResult) -> &'static str {
    if result.passed() { "pass" } else { "fail" }
}
