//! Per-test variable scope.

use std::collections::HashMap;

use verdict_core::Value;

use crate::bridge::Bridge;

/// Variables visible to one test, plus the optional external-function bridge.
///
/// A context is created fresh for every test and dropped when the test ends.
#[derive(Default)]
pub struct Context<'b> {
    vars: HashMap<String, Value>,
    bridge: Option<&'b dyn Bridge>,
}

impl<'b> Context<'b> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bridge(bridge: Option<&'b dyn Bridge>) -> Self {
        Self {
            vars: HashMap::new(),
            bridge,
        }
    }

    /// Bind (or rebind) a variable.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Look up a variable. Object values come back as shared handles.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn bridge(&self) -> Option<&'b dyn Bridge> {
        self.bridge
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("vars", &self.vars)
            .field("bridge", &self.bridge.is_some())
            .finish()
    }
}
