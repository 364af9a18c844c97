//! Subprocess bridge: one interpreter process per call.
//!
//! ## Lifecycle of a call
//!
//! 1. Write the adapter script to a fresh temporary file (removed when the call returns, on every path).
//! 2. Spawn `<exe> <script> <request>` for each executable candidate until one spawns.
//! 3. Drain stdout/stderr on reader threads while polling the child against the deadline.
//! 4. Parse the last stdout line that is a JSON object as the [`Response`].

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use verdict_core::Value;

use super::{Bridge, BridgeError, BridgeSettings, Request, Response, Runtime};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`Bridge`] that runs each call in a fresh interpreter process.
#[derive(Debug, Clone)]
pub struct SubprocessBridge {
    runtime: Runtime,
    executables: &'static [&'static str],
    script: String,
    timeout: Duration,
}

impl SubprocessBridge {
    /// Build a bridge; the adapter script is rendered once here and written per call.
    pub fn new(settings: &BridgeSettings) -> Self {
        Self {
            runtime: settings.runtime,
            executables: settings.runtime.executables(),
            script: settings.runtime.render_adapter(&settings.modules),
            timeout: settings.timeout,
        }
    }

    /// Replace the executable candidates tried in order.
    #[cfg(test)]
    fn with_executables(mut self, executables: &'static [&'static str]) -> Self {
        self.executables = executables;
        self
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    fn write_script(&self) -> Result<NamedTempFile, BridgeError> {
        let io_err = |context: &str| {
            let context = context.to_string();
            move |source| BridgeError::Io { context, source }
        };
        let mut file = tempfile::Builder::new()
            .prefix("verdict_bridge_")
            .suffix(self.runtime.script_extension())
            .tempfile()
            .map_err(io_err("creating adapter script"))?;
        file.write_all(self.script.as_bytes())
            .and_then(|()| file.flush())
            .map_err(io_err("writing adapter script"))?;
        Ok(file)
    }

    /// Spawn the first executable candidate that can be started.
    fn spawn(&self, script: &Path, request: &str) -> Result<Child, BridgeError> {
        let mut tried = Vec::new();
        let mut first_error = None;
        for exe in self.executables {
            tried.push((*exe).to_string());
            let spawned = Command::new(exe)
                .arg(script)
                .arg(request)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn();
            match spawned {
                Ok(child) => {
                    tracing::debug!(runtime = %self.runtime, exe, "spawned bridge process");
                    return Ok(child);
                }
                Err(err) => {
                    tracing::debug!(runtime = %self.runtime, exe, error = %err, "bridge candidate failed to spawn");
                    first_error.get_or_insert(err);
                }
            }
        }
        Err(BridgeError::ExecutionFailed {
            runtime: self.runtime,
            tried,
            source: first_error.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no executable candidates")),
        })
    }

    fn wait(&self, child: &mut Child, function: &str) -> Result<ExitStatus, BridgeError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    tracing::warn!(runtime = %self.runtime, function, "bridge call timed out; killing process");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(BridgeError::Timeout {
                        runtime: self.runtime,
                        function: function.to_string(),
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    return Err(BridgeError::Io {
                        context: "waiting for bridge process".to_string(),
                        source,
                    });
                }
            }
        }
    }

    fn parse_output(&self, function: &str, status: ExitStatus, stdout: &str, stderr: &str) -> Result<Value, BridgeError> {
        let line = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| l.starts_with('{') && serde_json::from_str::<serde_json::Value>(l).is_ok_and(|v| v.is_object()));

        let Some(line) = line else {
            let reason = if status.success() {
                "no JSON response line".to_string()
            } else {
                format!("process exited with {status}")
            };
            return Err(BridgeError::Protocol {
                runtime: self.runtime,
                reason,
                output: combine(stdout, stderr),
            });
        };

        let response: Response = serde_json::from_str(line).map_err(|err| BridgeError::Protocol {
            runtime: self.runtime,
            reason: err.to_string(),
            output: combine(stdout, stderr),
        })?;
        response.into_result(function)
    }
}

impl Bridge for SubprocessBridge {
    #[tracing::instrument(skip_all, fields(runtime = %self.runtime, function = %function))]
    fn call(&self, function: &str, args: &[Value]) -> Result<Value, BridgeError> {
        let request = Request::new(function, args).encode()?;
        let script = self.write_script()?;

        let mut child = self.spawn(script.path(), &request)?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout the readers are left behind; they finish once the killed child's pipes close.
        let status = self.wait(&mut child, function)?;
        let stdout = join(stdout);
        let stderr = join(stderr);
        tracing::debug!(%status, stdout_len = stdout.len(), stderr_len = stderr.len(), "bridge process exited");

        let result = self.parse_output(function, status, &stdout, &stderr);
        drop(script);
        result
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn combine(stdout: &str, stderr: &str) -> String {
    match (stdout.trim().is_empty(), stderr.trim().is_empty()) {
        (_, true) => stdout.trim_end().to_string(),
        (true, false) => stderr.trim_end().to_string(),
        (false, false) => format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
    }
}
