//! `verdict.yaml` project configuration.
//!
//! ```yaml
//! runtime: python          # node | python | lua (default: node)
//! modules:                 # relative to the config file's directory
//!   - src/math.py
//! timeout_ms: 5000         # per external call (default: 30000)
//! ```
//!
//! ## Notes
//! - The file is optional; without it the defaults apply and no external functions are available.
//! - Module paths are resolved to absolute paths at load time so adapters work from any temp directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::bridge::subprocess::DEFAULT_TIMEOUT;
use crate::bridge::{BridgeSettings, Runtime};

pub const CONFIG_FILE_NAME: &str = "verdict.yaml";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub runtime: Runtime,
    pub modules: Vec<PathBuf>,
    pub timeout: Duration,
    /// The file this was loaded from, if any.
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: Runtime::default(),
            modules: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            source: None,
        }
    }
}

impl Config {
    /// Bridge settings for a file, or `None` when no modules are configured.
    ///
    /// `runtime` overrides the configured runtime (a tagged test file picks its own).
    pub fn bridge_settings(&self, runtime: Option<Runtime>) -> Option<BridgeSettings> {
        if self.modules.is_empty() {
            return None;
        }
        Some(BridgeSettings {
            runtime: runtime.unwrap_or(self.runtime),
            modules: self.modules.clone(),
            timeout: self.timeout,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    runtime: Option<String>,
    modules: Vec<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(verdict::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {message}", CONFIG_FILE_NAME)]
    #[diagnostic(code(verdict::config::yaml))]
    Yaml {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: Option<SourceSpan>,
    },

    #[error("unsupported runtime: {runtime}")]
    #[diagnostic(code(verdict::config::runtime), help("supported runtimes: node, python, lua"))]
    UnsupportedRuntime {
        runtime: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown runtime")]
        span: Option<SourceSpan>,
    },
}

/// Load `verdict.yaml` from `dir`, falling back to defaults when it does not exist.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn load(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no config file; using defaults");
            return Ok(Config::default());
        }
        Err(source) => return Err(ConfigError::Io { path, source }),
    };
    parse(&path, &source)
}

/// Parse config source text. Relative module paths resolve against the file's directory.
pub fn parse(path: &Path, source: &str) -> Result<Config, ConfigError> {
    let named = || NamedSource::new(path.display().to_string(), source.to_string());
    let raw: RawConfig = if source.trim().is_empty() {
        RawConfig::default()
    } else {
        serde_yaml::from_str(source).map_err(|err| ConfigError::Yaml {
            message: err.to_string(),
            src: named(),
            span: err.location().map(|loc| SourceSpan::from((loc.index(), 0))),
        })?
    };

    let runtime = match raw.runtime.as_deref().map(str::trim) {
        None | Some("") => Runtime::default(),
        Some(name) => Runtime::from_name(name).ok_or_else(|| ConfigError::UnsupportedRuntime {
            runtime: name.to_string(),
            src: named(),
            span: source.find(name).map(|at| SourceSpan::from((at, name.len()))),
        })?,
    };

    let base = path.parent().unwrap_or(Path::new("."));
    let modules = raw
        .modules
        .iter()
        .map(|m| {
            let joined = base.join(m);
            std::path::absolute(&joined).map_err(|source| ConfigError::Io { path: joined, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Config {
        runtime,
        modules,
        timeout: raw.timeout_ms.map_or(DEFAULT_TIMEOUT, Duration::from_millis),
        source: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.bridge_settings(None).is_none());
    }

    #[test]
    fn test_modules_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "runtime: python\nmodules:\n  - src/math.py\ntimeout_ms: 1500\n",
        )
        .unwrap();
        let config = load(dir.path()).unwrap();
        assert_eq!(config.runtime, Runtime::Python);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.modules.len(), 1);
        assert!(config.modules[0].is_absolute());
        assert!(config.modules[0].ends_with("src/math.py"));

        let settings = config.bridge_settings(Some(Runtime::Lua)).unwrap();
        assert_eq!(settings.runtime, Runtime::Lua);
        assert_eq!(config.bridge_settings(None).unwrap().runtime, Runtime::Python);
    }

    #[test]
    fn test_unknown_runtime_is_rejected() {
        let err = parse(Path::new("verdict.yaml"), "runtime: go\n").unwrap_err();
        assert_eq!(err.to_string(), "unsupported runtime: go");
        let ConfigError::UnsupportedRuntime { span, .. } = err else {
            panic!("expected unsupported runtime");
        };
        assert_eq!(span.unwrap().offset(), 9);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse(Path::new("/p/verdict.yaml"), "").unwrap();
        assert_eq!(config.runtime, Runtime::Node);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse(Path::new("verdict.yaml"), "modules: [a\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
