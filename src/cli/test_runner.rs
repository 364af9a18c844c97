//! Test discovery and execution for `verdict run`.
//!
//! ## Flow
//!
//! 1. Load `verdict.yaml` from the working directory
//! 2. Discover `*.verdict` files under the given path
//! 3. For each file: pick its runtime, build a bridge when modules are configured, load and run its tests
//! 4. Report each result and the final summary through a [`TestReporter`]
//!
//! A file that fails to load is reported and skipped; the run continues with the next file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, GraphicalReportHandler};

use super::test_interfaces::{BridgeFactory, DefaultBridgeFactory, DefaultTestDiscovery, TestDiscovery, TestError};
use super::{CliError, CliResult, ExitCode};
use crate::bridge::Runtime;
use crate::config::{self, Config};
use crate::engine::run_test;
use crate::report::{OutputFormat, RunSummary, SummaryBuilder, TestReporter};

/// Test file extension.
pub const TEST_FILE_EXTENSION: &str = "verdict";

/// Options for one `verdict run` invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Only run tests whose name contains this substring.
    pub filter: Option<String>,
    /// Stop after the first failing test.
    pub stop_on_fail: bool,
    pub watch: bool,
}

// ============================================================================
// Entry points
// ============================================================================

/// Run tests and map failures to an exit code.
pub fn run_tests(options: &RunOptions) -> CliResult<ExitCode> {
    if options.watch {
        return super::watch::watch(options);
    }
    let summary = run_pass(options)?;
    if summary.has_failures() {
        return Err(CliError::failure(format!("{} test(s) failed", summary.failed)));
    }
    Ok(ExitCode::SUCCESS)
}

/// One full pass: load config, discover, run, report to stdout.
pub(crate) fn run_pass(options: &RunOptions) -> CliResult<RunSummary> {
    let config = config::load(Path::new(".")).map_err(|e| CliError::failure(render_diagnostic(&e)))?;
    let stdout = io::stdout();
    let mut reporter = options.format.reporter(stdout.lock());
    run_once(options, &config, &DefaultTestDiscovery, &DefaultBridgeFactory, reporter.as_mut())
        .map_err(|e| CliError::failure(render_diagnostic(&e)))
}

/// Run every matching test once and return the summary.
///
/// ## Errors
/// - Discovery and reporter output failures. Per-file load errors are reported, not returned.
#[tracing::instrument(skip_all, fields(path = %options.path.display()))]
pub fn run_once(
    options: &RunOptions,
    config: &Config,
    discovery: &dyn TestDiscovery,
    bridges: &dyn BridgeFactory,
    reporter: &mut dyn TestReporter,
) -> Result<RunSummary, TestError> {
    let files = discovery.discover_test_files(&options.path)?;
    if files.is_empty() {
        reporter.on_no_files(&options.path)?;
        return Ok(RunSummary::default());
    }
    tracing::debug!(files = files.len(), "discovered test files");

    reporter.on_run_start(files.len())?;
    let mut summary = SummaryBuilder::new();

    'files: for file in &files {
        let runtime = Runtime::from_file_name(file);
        let bridge = config.bridge_settings(runtime).map(|settings| bridges.create(&settings));

        let test_file = match discovery.load_test_file(file) {
            Ok(test_file) => test_file,
            Err(err) => {
                tracing::warn!(file = %file.display(), error = %err, "skipping test file");
                reporter.on_file_error(file, &err)?;
                continue;
            }
        };

        reporter.on_file_start(file)?;
        for test in &test_file.tests {
            if !matches_filter(&test.name, options.filter.as_deref()) {
                continue;
            }
            let result = run_test(test, bridge.as_deref());
            summary.record(&result);
            reporter.on_test_complete(file, test, &result)?;
            if options.stop_on_fail && !result.passed() {
                reporter.on_file_end(file)?;
                break 'files;
            }
        }
        reporter.on_file_end(file)?;
    }

    let summary = summary.finish();
    reporter.on_run_complete(&summary)?;
    Ok(summary)
}

fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|f| name.contains(f))
}

/// Render a diagnostic with source context for stderr.
pub(crate) fn render_diagnostic(err: &dyn Diagnostic) -> String {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, err) {
        Ok(()) => out,
        Err(_) => err.to_string(),
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// Discover test files.
///
/// - A directory is scanned recursively for `*.verdict`, skipping hidden directories, `target` and
///   `node_modules`.
/// - An existing file is taken as-is.
/// - A missing path is retried as `<path>.verdict` and `<path>.<tag>.verdict` for every runtime tag.
pub fn discover_test_files(path: &Path) -> Result<Vec<PathBuf>, TestError> {
    let mut files = Vec::new();
    if path.is_dir() {
        scan_dir(path, &mut files)?;
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        let base = path.as_os_str().to_string_lossy();
        let candidates = std::iter::once(format!("{base}.{TEST_FILE_EXTENSION}"))
            .chain(Runtime::all_file_tags().map(|tag| format!("{base}.{tag}.{TEST_FILE_EXTENSION}")));
        for candidate in candidates {
            let candidate = PathBuf::from(candidate);
            if candidate.is_file() && !files.contains(&candidate) {
                files.push(candidate);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), TestError> {
    let entries = fs::read_dir(dir).map_err(|e| TestError::Discovery(format!("{}: {e}", dir.display())))?;
    for entry in entries.flatten() {
        let entry_path = entry.path();
        let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if entry_path.is_dir() {
            if !name.starts_with('.') && name != "target" && name != "node_modules" {
                scan_dir(&entry_path, files)?;
            }
        } else if is_test_file(&entry_path) {
            files.push(entry_path);
        }
    }
    Ok(())
}

fn is_test_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(TEST_FILE_EXTENSION)
}
