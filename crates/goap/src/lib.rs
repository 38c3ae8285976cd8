// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pure GOAP evaluation functions (spec §4.C): precondition satisfaction,
//! progress computation, and world-state merge. None of these touch the
//! store; every input and output is plain `serde_json::Value`.

use serde_json::Value;

/// Result of evaluating a goal's progress toward completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub complete: bool,
    pub satisfied: usize,
    pub total: usize,
}

/// Returns true if `preconditions` is absent, an empty array, or every
/// string element appears as a key in `world_state` mapped to boolean
/// true. Non-string elements are ignored. Malformed JSON (anything other
/// than `null` or an array) yields false.
pub fn preconditions_met(preconditions: Option<&Value>, world_state: &Value) -> bool {
    let elems = match preconditions {
        None => return true,
        Some(Value::Null) => return true,
        Some(Value::Array(elems)) => elems,
        Some(_) => return false,
    };
    let world = world_state.as_object();
    elems.iter().filter_map(Value::as_str).all(|key| {
        world
            .and_then(|w| w.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    })
}

/// Iterates the keys of `goal_state` (always treated as an object,
/// defaulting to empty when it isn't one). `satisfied` counts keys
/// present as `true` in `world_state`. `complete` is `total == satisfied`.
///
/// A goal whose `goal_state` is `{}` yields `{complete: true, satisfied:
/// 0, total: 0}` — degenerate but defined.
pub fn progress(goal_state: &Value, world_state: &Value) -> Progress {
    let goal = goal_state.as_object();
    let world = world_state.as_object();
    let total = goal.map_or(0, |g| g.len());
    let satisfied = goal.map_or(0, |g| {
        g.keys()
            .filter(|key| {
                world
                    .and_then(|w| w.get(key.as_str()))
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
            })
            .count()
    });
    Progress {
        complete: total == satisfied,
        satisfied,
        total,
    }
}

/// For each boolean-valued key in `assertions`, replaces the key in
/// `current` with that boolean; non-boolean entries are ignored. Keys not
/// mentioned in `assertions` are retained from `current`.
///
/// Associative when restricted to boolean values — repeated applications
/// yield the same result as a single merged application, and applying the
/// same update twice is a no-op past the first application.
pub fn merge_world_state(current: &Value, assertions: &Value) -> Value {
    let mut merged = current.as_object().cloned().unwrap_or_default();
    if let Some(updates) = assertions.as_object() {
        for (key, value) in updates {
            if let Value::Bool(b) = value {
                merged.insert(key.clone(), Value::Bool(*b));
            }
        }
    }
    Value::Object(merged)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
