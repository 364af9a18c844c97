//! Test runner I/O boundary interfaces
//!
//! This module defines trait-based abstractions for the runner's side effects:
//! - Test discovery (filesystem scan + YAML load)
//! - Bridge creation (one external-function bridge per runtime)
//!
//! The runner only talks to these traits, so tests can feed it in-memory files and fake bridges.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use verdict_syntax::{TestFile, TestFileError};

use crate::bridge::{Bridge, BridgeSettings, SubprocessBridge};
use crate::config::ConfigError;

/// Errors that occur during test operations
#[derive(Debug, Error, Diagnostic)]
pub enum TestError {
    #[error("failed to discover tests: {0}")]
    #[diagnostic(code(verdict::discovery))]
    Discovery(String),

    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(verdict::io))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TestFile(#[from] TestFileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Test Discovery Interface
// ============================================================================

/// Find and load test files.
pub trait TestDiscovery {
    /// Find all test files under a path (recursive), sorted.
    fn discover_test_files(&self, path: &Path) -> Result<Vec<PathBuf>, TestError>;

    /// Read and parse one test file.
    fn load_test_file(&self, path: &Path) -> Result<TestFile, TestError>;
}

// ============================================================================
// Bridge Factory Interface
// ============================================================================

/// Create the external-function bridge for a file's runtime.
pub trait BridgeFactory {
    fn create(&self, settings: &BridgeSettings) -> Box<dyn Bridge>;
}

// ============================================================================
// Default Implementations
// ============================================================================

/// Filesystem-based test discovery.
pub struct DefaultTestDiscovery;

impl TestDiscovery for DefaultTestDiscovery {
    fn discover_test_files(&self, path: &Path) -> Result<Vec<PathBuf>, TestError> {
        super::test_runner::discover_test_files(path)
    }

    fn load_test_file(&self, path: &Path) -> Result<TestFile, TestError> {
        let source = fs::read_to_string(path).map_err(|source| TestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(verdict_syntax::parse_test_source(path, &source)?)
    }
}

/// Subprocess bridges (one interpreter process per call).
pub struct DefaultBridgeFactory;

impl BridgeFactory for DefaultBridgeFactory {
    fn create(&self, settings: &BridgeSettings) -> Box<dyn Bridge> {
        Box::new(SubprocessBridge::new(settings))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_discovery_loads_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("math.verdict");
        fs::write(&path, "adds:\n  when:\n    - r = add(1, 2)\n  then:\n    - \"expect: r == 3\"\n").unwrap();

        let discovery = DefaultTestDiscovery;
        assert_eq!(discovery.discover_test_files(dir.path()).unwrap(), vec![path.clone()]);
        let file = discovery.load_test_file(&path).unwrap();
        assert_eq!(file.tests.len(), 1);
        assert_eq!(file.tests[0].name, "adds");
    }

    #[test]
    fn test_load_errors_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = DefaultTestDiscovery.load_test_file(&dir.path().join("nope.verdict"));
        assert!(matches!(missing, Err(TestError::Read { .. })));

        let path = dir.path().join("bad.verdict");
        fs::write(&path, "- just\n- a list\n").unwrap();
        let bad = DefaultTestDiscovery.load_test_file(&path).unwrap_err();
        assert!(matches!(bad, TestError::TestFile(_)));
        assert!(bad.code().is_some());
    }
}
