//! `verdict run --watch`: poll test files and re-run on change.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use super::test_runner::{RunOptions, discover_test_files, run_pass};
use super::{CliResult, ExitCode};
use crate::report::OutputFormat;

pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Last seen modification time per test file.
#[derive(Debug, Default)]
pub struct Snapshot {
    mtimes: HashMap<PathBuf, SystemTime>,
}

impl Snapshot {
    /// Record `files`; returns whether any is new or has a later modification time.
    pub fn update(&mut self, files: &[PathBuf]) -> bool {
        let mut changed = false;
        for file in files {
            let Some(mtime) = modified(file) else {
                continue;
            };
            match self.mtimes.get(file) {
                Some(seen) if mtime <= *seen => {}
                _ => {
                    self.mtimes.insert(file.clone(), mtime);
                    changed = true;
                }
            }
        }
        changed
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Run once, then re-run whenever a test file appears or changes. Returns only on a fatal error.
pub fn watch(options: &RunOptions) -> CliResult<ExitCode> {
    let pretty = options.format == OutputFormat::Pretty;
    println!("👀 Watch mode enabled - press Ctrl+C to stop");
    println!("Watching: {}\n", options.path.display());

    let mut snapshot = Snapshot::default();
    snapshot.update(&discover_test_files(&options.path).unwrap_or_default());
    report_pass(options);

    loop {
        thread::sleep(POLL_INTERVAL);
        let files = match discover_test_files(&options.path) {
            Ok(files) => files,
            Err(err) => {
                tracing::debug!(error = %err, "watch discovery failed");
                continue;
            }
        };
        if !snapshot.update(&files) {
            continue;
        }
        print!("{CLEAR_SCREEN}");
        if pretty {
            println!("🔄 Files changed, re-running tests...\n");
        }
        report_pass(options);
        if pretty {
            println!("\n👀 Watching for changes...");
        }
    }
}

/// Failures do not end watch mode.
fn report_pass(options: &RunOptions) {
    match run_pass(options) {
        Ok(summary) if summary.has_failures() => tracing::debug!(failed = summary.failed, "watch pass failed"),
        Ok(_) => {}
        Err(err) => eprintln!("{err}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_detects_new_and_modified_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.verdict");
        fs::write(&a, "x").unwrap();

        let mut snapshot = Snapshot::default();
        assert!(snapshot.update(std::slice::from_ref(&a)));
        assert!(!snapshot.update(std::slice::from_ref(&a)));

        let later = modified(&a).unwrap() + Duration::from_secs(5);
        fs::File::options().write(true).open(&a).unwrap().set_modified(later).unwrap();
        assert!(snapshot.update(std::slice::from_ref(&a)));

        let b = dir.path().join("b.verdict");
        fs::write(&b, "y").unwrap();
        assert!(snapshot.update(&[a, b.clone()]));
    }

    #[test]
    fn test_vanished_files_are_ignored() {
        let mut snapshot = Snapshot::default();
        assert!(!snapshot.update(&[PathBuf::from("/definitely/not/here.verdict")]));
    }
}
