//! External function bridges.
//!
//! A bridge forwards a function call that no built-in handles to a function implemented in another runtime
//! (Node.js, Python, Lua). Calls are synchronous subprocess RPC:
//!
//! ```text
//! <runtime-executable> <adapter-script> '{"function":"f","args":[1,"a",true]}'
//! -> {"result":[1,"a",true]}
//! ```
//!
//! ## Modules
//!
//! - `runtime` - runtime vocabulary (executables, script extensions, file tags) and adapter rendering
//! - `subprocess` - [`SubprocessBridge`], the process-spawning [`Bridge`] implementation
//!
//! ## Notes
//!
//! - The engine only sees the [`Bridge`] trait; tests inject in-process fakes.
//! - Values cross the boundary as JSON via [`verdict_core::json`].

pub mod runtime;
pub mod subprocess;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use verdict_core::Value;

pub use runtime::Runtime;
pub use subprocess::SubprocessBridge;

/// Capability to call a function that lives outside the interpreter.
pub trait Bridge {
    /// Call `function` with positional `args`.
    fn call(&self, function: &str, args: &[Value]) -> Result<Value, BridgeError>;
}

/// Errors raised while calling an external function.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{message}")]
    FunctionNotFound { function: String, message: String },

    #[error("{function} is not callable")]
    NotCallable { function: String },

    #[error("{runtime} execution failed (tried: {}): {source}", tried.join(", "))]
    ExecutionFailed {
        runtime: Runtime,
        tried: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {runtime} response: {reason}\nOutput: {output}")]
    Protocol {
        runtime: Runtime,
        reason: String,
        output: String,
    },

    #[error("{message}")]
    ExternalFunction { function: String, message: String },

    #[error("{runtime} call to {function}() timed out after {}ms", timeout.as_millis())]
    Timeout {
        runtime: Runtime,
        function: String,
        timeout: Duration,
    },

    #[error("bridge I/O failed ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode bridge request: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Wire request: `{"function": "<name>", "args": [...]}`.
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub function: &'a str,
    pub args: Vec<serde_json::Value>,
}

impl<'a> Request<'a> {
    pub fn new(function: &'a str, args: &[Value]) -> Self {
        Self {
            function,
            args: args.iter().map(verdict_core::json::to_json).collect(),
        }
    }

    pub fn encode(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Error categories an adapter may attach to an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ErrorKind {
    FunctionNotFound,
    NotCallable,
    #[serde(other)]
    Other,
}

/// Wire response: `{"result": ...}` or `{"error": "...", "kind"?: "..."}`.
#[derive(Debug, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub kind: Option<ErrorKind>,
}

impl Response {
    /// Turn the envelope into the call result.
    ///
    /// A missing or `null` result is [`Value::Null`]; an empty `error` string counts as no error.
    pub fn into_result(self, function: &str) -> Result<Value, BridgeError> {
        match self.error.filter(|e| !e.is_empty()) {
            Some(message) => Err(match self.kind {
                Some(ErrorKind::FunctionNotFound) => BridgeError::FunctionNotFound {
                    function: function.to_string(),
                    message,
                },
                Some(ErrorKind::NotCallable) => BridgeError::NotCallable {
                    function: function.to_string(),
                },
                Some(ErrorKind::Other) | None => BridgeError::ExternalFunction {
                    function: function.to_string(),
                    message,
                },
            }),
            None => Ok(self
                .result
                .as_ref()
                .map(verdict_core::json::from_json)
                .unwrap_or(Value::Null)),
        }
    }
}

/// Bridge settings resolved from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeSettings {
    pub runtime: Runtime,
    pub modules: Vec<PathBuf>,
    pub timeout: Duration,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_encoding() {
        let args = [Value::Number(1.0), Value::from("a"), Value::Bool(true)];
        let encoded = Request::new("f", &args).encode().unwrap();
        insta::assert_snapshot!(encoded, @r#"{"function":"f","args":[1,"a",true]}"#);
    }

    #[test]
    fn test_fractional_numbers_stay_floats() {
        let encoded = Request::new("half", &[Value::Number(2.5)]).encode().unwrap();
        assert_eq!(encoded, r#"{"function":"half","args":[2.5]}"#);
    }

    #[test]
    fn test_response_result() {
        let response: Response = serde_json::from_str(r#"{"result":[1,"a",true]}"#).unwrap();
        assert_eq!(
            response.into_result("f").unwrap(),
            Value::List(vec![Value::Number(1.0), Value::from("a"), Value::Bool(true)])
        );
    }

    #[test]
    fn test_response_missing_result_is_null() {
        let response: Response = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_result("f").unwrap(), Value::Null);
    }

    #[test]
    fn test_response_error_kinds() {
        let response: Response =
            serde_json::from_str(r#"{"error":"function nope not found. Available: add","kind":"FunctionNotFound"}"#)
                .unwrap();
        assert!(matches!(response.into_result("nope"), Err(BridgeError::FunctionNotFound { .. })));

        let response: Response = serde_json::from_str(r#"{"error":"x is not a function","kind":"NotCallable"}"#).unwrap();
        assert!(matches!(response.into_result("x"), Err(BridgeError::NotCallable { .. })));

        let response: Response = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        let err = response.into_result("explode").unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_empty_error_is_success() {
        let response: Response = serde_json::from_str(r#"{"result":3,"error":""}"#).unwrap();
        assert_eq!(response.into_result("f").unwrap(), Value::Number(3.0));
    }
}
