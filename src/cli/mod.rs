//! CLI module for verdict
//!
//! ## Commands
//!
//! - `run [path]` - Run `*.verdict` tests (`--watch`, `--format`, `-k`, `-x`)
//! - `init` - Write a starter `verdict.yaml` and example test
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `test_interfaces` - Discovery and bridge-creation seams
//! - `test_runner` - Test discovery and execution
//! - `watch` - Polling re-runner
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod test_interfaces;
pub mod test_runner;
pub mod watch;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use crate::report::OutputFormat;
use crate::version::VERDICT_VERSION;
use test_runner::RunOptions;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Declarative, confidence-scored tests for code in any runtime
#[derive(Parser, Debug)]
#[command(name = "verdict")]
#[command(version = VERDICT_VERSION)]
#[command(about = "Declarative, confidence-scored tests for code in any runtime", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run tests
    Run {
        /// Test file, directory, or file name without extension
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
        /// Watch for changes and re-run tests
        #[arg(short, long)]
        watch: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
        /// Only run tests whose name contains this text
        #[arg(short = 'k', value_name = "EXPR")]
        filter: Option<String>,
        /// Stop on first failure
        #[arg(short = 'x', long = "exitfirst")]
        stop_on_fail: bool,
    },

    /// Initialize verdict in the current directory
    Init,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run {
            path,
            watch,
            format,
            filter,
            stop_on_fail,
        } => test_runner::run_tests(&RunOptions {
            path,
            format,
            filter,
            stop_on_fail,
            watch,
        }),
        Command::Init => commands::init_project(Path::new(".")),
    }
}

// ============================================================================
// Tests
// ============================================================================
