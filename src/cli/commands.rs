//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use super::{CliError, CliResult, ExitCode};
use crate::config::CONFIG_FILE_NAME;

pub const EXAMPLE_FILE_NAME: &str = "example.verdict";

const CONFIG_TEMPLATE: &str = "\
# verdict project configuration
runtime: node        # node | python | lua
modules: []          # e.g. [src/math.js], relative to this file
timeout_ms: 30000    # per external function call
";

const EXAMPLE_TEMPLATE: &str = "\
# Example verdict tests
# Run with: verdict run

adds two numbers:
  confidence: 0.95
  given:
    a: 2
    b: 3
  when:
    - result = add(a, b)
  then:
    - \"expect: result == 5\"
";

// ============================================================================
// init
// ============================================================================

/// Write a starter config and example test into `dir`. Existing files are never overwritten.
pub fn init_project(dir: &Path) -> CliResult<ExitCode> {
    let files = [(CONFIG_FILE_NAME, CONFIG_TEMPLATE), (EXAMPLE_FILE_NAME, EXAMPLE_TEMPLATE)];
    if let Some((name, _)) = files.iter().find(|(name, _)| dir.join(name).exists()) {
        return Err(CliError::failure(format!("Error: {name} already exists; refusing to overwrite")));
    }
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents)
            .map_err(|e| CliError::failure(format!("Error writing {}: {e}", path.display())))?;
    }

    println!("✅ verdict initialized!");
    println!("\nNext steps:");
    println!("  1. Edit {EXAMPLE_FILE_NAME} or add more *.verdict files");
    println!("  2. Run tests: verdict run");
    Ok(ExitCode::SUCCESS)
}
