//! Convert between [`Value`] and `serde_json::Value` at the bridge boundary.
//!
//! ## Notes
//! - Integral finite numbers are encoded as JSON integers (`1`, not `1.0`) so adapters in every runtime see the
//!   natural integer type. Non-finite numbers have no JSON form and encode as `null`.
//! - JSON integers decode to [`Value::Number`]; there is no integer value type.
//! - Objects can alias themselves (`x.self = x`). Encoding replaces a re-entered object with the string
//!   `"[circular]"` instead of recursing forever.

use std::collections::HashSet;

use serde_json::{Map, Number};

use crate::numeric::is_wire_integer;
use crate::value::{Object, Value};

/// Marker written in place of an object that is already being encoded.
pub const CIRCULAR_MARKER: &str = "[circular]";

/// Encode a value as JSON.
pub fn to_json(value: &Value) -> serde_json::Value {
    let mut active = HashSet::new();
    encode(value, &mut active)
}

fn encode(value: &Value, active: &mut HashSet<usize>) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => encode_number(*n),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(|v| encode(v, active)).collect()),
        Value::Object(obj) => encode_object(obj, active),
    }
}

fn encode_number(n: f64) -> serde_json::Value {
    if is_wire_integer(n) {
        serde_json::Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

fn encode_object(obj: &Object, active: &mut HashSet<usize>) -> serde_json::Value {
    let addr = obj.addr();
    if !active.insert(addr) {
        return serde_json::Value::String(CIRCULAR_MARKER.to_string());
    }
    let map: Map<String, serde_json::Value> = obj
        .entries()
        .iter()
        .map(|(k, v)| (k.clone(), encode(v, active)))
        .collect();
    active.remove(&addr);
    serde_json::Value::Object(map)
}

/// Decode JSON into a fresh value tree (every object is a new, unshared mapping).
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(from_json).collect()),
        serde_json::Value::Object(map) => Value::object(map.iter().map(|(k, v)| (k.clone(), from_json(v)))),
    }
}
