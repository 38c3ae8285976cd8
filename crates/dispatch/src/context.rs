// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work-context construction and the prerequisite-results algorithm
//! (spec §4.E steps 2–3).

use std::collections::BTreeMap;

use scaffold_core::{truncate_result, Action, DEFAULT_ROLE};
use serde_json::{json, Value};

/// Parses `preconditions`/`effects` as stored on an [`Action`] and returns
/// the set of string keys they share with `action`'s own preconditions.
fn shares_any_key(action_preconditions: &[String], candidate_effects: &[String]) -> bool {
    candidate_effects.iter().any(|e| action_preconditions.contains(e))
}

/// Prerequisite-results algorithm (spec §4.E step 3): for every Completed
/// action of the same goal whose effects share any key with `action`'s
/// preconditions, include that action's result — truncated to
/// [`scaffold_core::RESULT_TRUNCATION_LIMIT`] bytes — keyed by action id.
///
/// Returns an empty object immediately if `action.preconditions` is
/// empty, without inspecting `completed_actions`.
pub fn prerequisite_results(action: &Action, completed_actions: &[Action]) -> Value {
    let mut out = BTreeMap::new();
    if action.preconditions.is_empty() {
        return json!(out);
    }
    for candidate in completed_actions {
        if !shares_any_key(&action.preconditions, &candidate.effects) {
            continue;
        }
        let result = candidate.result.as_deref().unwrap_or("");
        out.insert(candidate.id.to_string(), truncate_result(result));
    }
    json!(out)
}

/// Builds the work-context JSON object handed to a worker (spec §4.E
/// step 2): `goal`, `action`, `role`, `world_state`, `prerequisite_results`.
pub fn build_work_context(
    goal_description: &str,
    action: &Action,
    world_state: &Value,
    completed_actions: &[Action],
) -> Value {
    let role = if action.role.is_empty() {
        DEFAULT_ROLE
    } else {
        action.role.as_str()
    };
    json!({
        "goal": goal_description,
        "action": action.description,
        "role": role,
        "world_state": world_state,
        "prerequisite_results": prerequisite_results(action, completed_actions),
    })
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
