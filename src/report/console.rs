//! Colored console reporter.

use std::io::{self, Write};
use std::path::Path;

use miette::GraphicalReportHandler;
use verdict_syntax::TestCase;

use super::{RunSummary, TestReporter};
use crate::cli::test_interfaces::TestError;
use crate::engine::TestResult;
use crate::version::VERDICT_VERSION;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";

/// Confidence below this is highlighted.
pub const LOW_CONFIDENCE: f64 = 0.8;

fn confidence_color(confidence: f64) -> &'static str {
    if confidence < LOW_CONFIDENCE { YELLOW } else { GREEN }
}

/// Human-readable progress and summary output.
pub struct PrettyReporter<W: Write> {
    out: W,
}

impl<W: Write> PrettyReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TestReporter for PrettyReporter<W> {
    fn on_no_files(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "No test files found matching pattern: {}", path.display())
    }

    fn on_run_start(&mut self, _file_count: usize) -> io::Result<()> {
        write!(self.out, "\n🌊 verdict v{VERDICT_VERSION}\n\n")
    }

    fn on_file_start(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "{CYAN}Running {}:{RESET}", path.display())
    }

    fn on_file_error(&mut self, path: &Path, error: &TestError) -> io::Result<()> {
        writeln!(self.out, "❌ Failed to parse {}: {error}", path.display())?;
        let mut rendered = String::new();
        if GraphicalReportHandler::new().render_report(&mut rendered, error).is_ok() {
            writeln!(self.out, "{rendered}")?;
        }
        Ok(())
    }

    fn on_test_complete(&mut self, _path: &Path, _test: &TestCase, result: &TestResult) -> io::Result<()> {
        match result.error_message() {
            None => writeln!(
                self.out,
                "  {GREEN}✅ {}{RESET} {}(confident: {:.2}){RESET}",
                result.name,
                confidence_color(result.confidence),
                result.confidence
            ),
            Some(message) => {
                writeln!(self.out, "  {RED}❌ {}{RESET}", result.name)?;
                writeln!(self.out, "     {GRAY}Error: {message}{RESET}")
            }
        }
    }

    fn on_file_end(&mut self, _path: &Path) -> io::Result<()> {
        writeln!(self.out)
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let fail_color = if summary.has_failures() { RED } else { GREEN };
        writeln!(
            self.out,
            "{BOLD}Tests: {GREEN}{} passed{RESET}{BOLD}, {fail_color}{} failed{RESET}{BOLD}, {} total{RESET}",
            summary.passed, summary.failed, summary.total
        )?;
        if summary.total > 0 {
            writeln!(
                self.out,
                "{BOLD}Confidence: {}avg {:.2}{RESET}{BOLD}, min {:.2}, max {:.2}{RESET}",
                confidence_color(summary.average_confidence),
                summary.average_confidence,
                summary.min_confidence,
                summary.max_confidence
            )?;
        }
        writeln!(self.out, "Time: {:.3}s", summary.duration_seconds)?;
        self.out.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::EvalError;
    use crate::report::SummaryBuilder;
    use crate::report::test_support::*;

    fn render(results: &[TestResult]) -> String {
        let mut reporter = PrettyReporter::new(Vec::new());
        let path = Path::new("math.verdict");
        let mut summary = SummaryBuilder::new();
        reporter.on_file_start(path).unwrap();
        for result in results {
            reporter.on_test_complete(path, &case(&result.name, 1.0), result).unwrap();
            summary.record(result);
        }
        reporter.on_file_end(path).unwrap();
        reporter.on_run_complete(&summary.finish()).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_passing_line_shows_confidence() {
        let out = render(&[passed("adds", 0.95)]);
        assert!(out.starts_with("\x1b[36mRunning math.verdict:\x1b[0m\n"));
        assert!(out.contains("  \x1b[32m✅ adds\x1b[0m \x1b[32m(confident: 0.95)\x1b[0m\n"));
        assert!(out.contains("0 failed"));
    }

    #[test]
    fn test_low_confidence_is_yellow() {
        let out = render(&[passed("guess", 0.6)]);
        assert!(out.contains("\x1b[33m(confident: 0.60)"));
        assert!(out.contains("\x1b[33mavg 0.60"));
    }

    #[test]
    fn test_failure_lines_carry_the_error() {
        let out = render(&[errored("broken", EvalError::DivisionByZero)]);
        assert!(out.contains("  \x1b[31m❌ broken\x1b[0m\n"));
        assert!(out.contains("     \x1b[90mError: Failed to execute statement 'result = add(a, 3)': division by zero"));
        assert!(out.contains("\x1b[31m1 failed"));
    }

    #[test]
    fn test_empty_run_omits_confidence() {
        let mut reporter = PrettyReporter::new(Vec::new());
        reporter.on_run_complete(&RunSummary::default()).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("0 total"));
        assert!(!out.contains("Confidence"));
        assert!(out.ends_with("Time: 0.000s\n"));
    }
}
