// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use scaffold_core::Action;
use serde_json::json;

#[test]
fn prerequisite_results_empty_when_no_preconditions() {
    let action = Action::builder().preconditions(vec![]).build();
    let completed = vec![Action::builder()
        .effects(vec!["x".to_string()])
        .result("some result".to_string())
        .build()];
    assert_eq!(prerequisite_results(&action, &completed), json!({}));
}

#[test]
fn prerequisite_results_includes_actions_sharing_a_key() {
    let action = Action::builder().preconditions(vec!["db_schema_exists".to_string()]).build();
    let matching = Action::builder()
        .effects(vec!["db_schema_exists".to_string()])
        .result("schema applied".to_string())
        .build();
    let not_matching = Action::builder()
        .effects(vec!["unrelated".to_string()])
        .result("irrelevant".to_string())
        .build();

    let result = prerequisite_results(&action, &[matching.clone(), not_matching]);
    assert_eq!(result.as_object().unwrap().len(), 1);
    assert_eq!(
        result[matching.id.to_string()],
        json!("schema applied")
    );
}

#[test]
fn prerequisite_results_truncates_long_results() {
    let action = Action::builder().preconditions(vec!["k".to_string()]).build();
    let long_result = "x".repeat(5000);
    let candidate = Action::builder()
        .effects(vec!["k".to_string()])
        .result(long_result.clone())
        .build();

    let result = prerequisite_results(&action, &[candidate.clone()]);
    let truncated = result[candidate.id.to_string()].as_str().unwrap();
    assert!(truncated.ends_with("...[truncated]"));
    assert!(truncated.len() < long_result.len());
}

#[test]
fn build_work_context_has_expected_shape() {
    let action = Action::builder()
        .description("run tests")
        .role("testing")
        .build();
    let ctx = build_work_context("ship the feature", &action, &json!({"a": true}), &[]);
    assert_eq!(ctx["goal"], json!("ship the feature"));
    assert_eq!(ctx["action"], json!("run tests"));
    assert_eq!(ctx["role"], json!("testing"));
    assert_eq!(ctx["world_state"], json!({"a": true}));
    assert_eq!(ctx["prerequisite_results"], json!({}));
}

#[test]
fn build_work_context_defaults_empty_role_to_implementation() {
    let action = Action::builder().role("").build();
    let ctx = build_work_context("goal", &action, &json!({}), &[]);
    assert_eq!(ctx["role"], json!(scaffold_core::DEFAULT_ROLE));
}
