// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

// --- preconditions_met boundary behaviors (spec §8) ---

#[test]
fn preconditions_met_null_is_true() {
    assert!(preconditions_met(Some(&Value::Null), &json!({})));
    assert!(preconditions_met(None, &json!({})));
}

#[test]
fn preconditions_met_empty_array_is_true() {
    assert!(preconditions_met(Some(&json!([])), &json!({})));
}

#[test]
fn preconditions_met_missing_key_is_false() {
    assert!(!preconditions_met(Some(&json!(["x"])), &json!({})));
}

#[test]
fn preconditions_met_false_valued_key_is_false() {
    assert!(!preconditions_met(Some(&json!(["x"])), &json!({"x": false})));
}

#[test]
fn preconditions_met_all_true_is_true() {
    assert!(preconditions_met(
        Some(&json!(["a", "b"])),
        &json!({"a": true, "b": true, "c": false})
    ));
}

#[test]
fn preconditions_met_ignores_non_string_elements() {
    assert!(preconditions_met(Some(&json!(["a", 1, null])), &json!({"a": true})));
}

#[test]
fn preconditions_met_malformed_json_is_false() {
    assert!(!preconditions_met(Some(&json!("not an array")), &json!({})));
    assert!(!preconditions_met(Some(&json!(42)), &json!({})));
}

// --- progress ---

#[test]
fn progress_empty_goal_state_is_complete() {
    let p = progress(&json!({}), &json!({}));
    assert_eq!(p, Progress { complete: true, satisfied: 0, total: 0 });
}

#[test]
fn progress_counts_satisfied_keys() {
    let p = progress(&json!({"a": true, "b": true}), &json!({"a": true, "b": false}));
    assert_eq!(p, Progress { complete: false, satisfied: 1, total: 2 });
}

#[test]
fn progress_complete_when_all_satisfied() {
    let p = progress(&json!({"a": true, "b": true}), &json!({"a": true, "b": true}));
    assert!(p.complete);
    assert_eq!(p.satisfied, 2);
    assert_eq!(p.total, 2);
}

#[test]
fn progress_missing_key_in_world_state_is_unsatisfied() {
    let p = progress(&json!({"a": true}), &json!({}));
    assert_eq!(p.satisfied, 0);
    assert!(!p.complete);
}

// --- merge_world_state ---

#[test]
fn merge_sets_boolean_keys() {
    let merged = merge_world_state(&json!({"a": false}), &json!({"a": true}));
    assert_eq!(merged, json!({"a": true}));
}

#[test]
fn merge_retains_unmentioned_keys() {
    let merged = merge_world_state(&json!({"a": true, "b": false}), &json!({"a": false}));
    assert_eq!(merged, json!({"a": false, "b": false}));
}

#[test]
fn merge_ignores_non_boolean_assertion_values() {
    let merged = merge_world_state(&json!({"a": true}), &json!({"a": "not a bool", "b": 5}));
    assert_eq!(merged, json!({"a": true}));
}

#[test]
fn merge_adds_new_keys() {
    let merged = merge_world_state(&json!({}), &json!({"a": true}));
    assert_eq!(merged, json!({"a": true}));
}

#[test]
fn merge_twice_is_idempotent() {
    let once = merge_world_state(&json!({"a": false}), &json!({"a": true}));
    let twice = merge_world_state(&once, &json!({"a": true}));
    assert_eq!(once, twice);
}

proptest! {
    #[test]
    fn merge_is_associative_for_boolean_updates(
        a in any::<bool>(), b in any::<bool>(), c in any::<bool>(),
    ) {
        let w = json!({"k": a});
        let update_a = json!({"k": b});
        let update_b = json!({"k": c});

        let sequential = merge_world_state(&merge_world_state(&w, &update_a), &update_b);
        // merge(A, B) here means "B wins over A" for any shared key, matching
        // the last-writer-wins semantics applied when merging twice in a row.
        let combined = merge_world_state(&update_a, &update_b);
        let single = merge_world_state(&w, &combined);

        prop_assert_eq!(sequential, single);
    }
}
