// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The JSON tool-call envelope (spec §6.2): `{"success": true, ...}` on
//! success, `{"success": false, "error": "<message>"}` on failure.

use serde_json::{Map, Value};

/// Wraps `payload` (expected to be a JSON object) with `success: true`.
pub fn success(payload: Value) -> Value {
    let mut obj = match payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            if !other.is_null() {
                map.insert("value".to_string(), other);
            }
            map
        }
    };
    obj.insert("success".to_string(), Value::Bool(true));
    Value::Object(obj)
}

/// Builds the failure envelope for any error implementing `Display`.
pub fn failure(message: impl std::fmt::Display) -> Value {
    serde_json::json!({
        "success": false,
        "error": message.to_string(),
    })
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
