// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use scaffold_core::{Action, Goal};
use serde_json::json;

fn test_store() -> StoreHandle {
    StoreHandle::open_in_memory().unwrap()
}

fn seed_goal(store: &StoreHandle) -> GoalId {
    crate::goal_store::insert(store, Goal::builder().build(), 0).unwrap().id
}

#[test]
fn insert_generates_fresh_id() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let a = insert(&store, Action::builder().goal_id(goal_id).build(), 10).unwrap();
    assert_eq!(a.id.as_str().len(), 36);
    assert_eq!(a.created_at, 10);
}

#[test]
fn get_round_trips_preconditions_and_effects() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let inserted = insert(
        &store,
        Action::builder()
            .goal_id(goal_id)
            .preconditions(vec!["a".to_string(), "b".to_string()])
            .effects(vec!["c".to_string()])
            .build(),
        0,
    )
    .unwrap();
    let fetched = get(&store, &inserted.id).unwrap().unwrap();
    assert_eq!(fetched, inserted);
}

#[test]
fn get_missing_id_returns_none() {
    let store = test_store();
    assert_eq!(get(&store, &ActionId::new()).unwrap(), None);
}

#[test]
fn list_by_goal_excludes_other_goals() {
    let store = test_store();
    let goal_a = seed_goal(&store);
    let goal_b = seed_goal(&store);
    let a1 = insert(&store, Action::builder().goal_id(goal_a).build(), 0).unwrap();
    insert(&store, Action::builder().goal_id(goal_b).build(), 0).unwrap();

    let for_a = list_by_goal(&store, &goal_a).unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].id, a1.id);
}

#[test]
fn list_top_level_excludes_children() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let parent = insert(&store, Action::builder().goal_id(goal_id).is_compound(true).build(), 0).unwrap();
    insert(
        &store,
        Action::builder().goal_id(goal_id).parent_action_id(parent.id).build(),
        0,
    )
    .unwrap();

    let top = list_top_level(&store, &goal_id).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, parent.id);
}

#[test]
fn list_by_parent_returns_children() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let parent = insert(&store, Action::builder().goal_id(goal_id).is_compound(true).build(), 0).unwrap();
    let child = insert(
        &store,
        Action::builder().goal_id(goal_id).parent_action_id(parent.id).build(),
        0,
    )
    .unwrap();

    let children = list_by_parent(&store, &parent.id).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, child.id);
}

#[test]
fn list_ready_filters_by_preconditions_met() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let ready = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    let blocked = insert(
        &store,
        Action::builder()
            .goal_id(goal_id)
            .preconditions(vec!["not_yet".to_string()])
            .build(),
        0,
    )
    .unwrap();

    let result = list_ready(&store, &goal_id, &json!({})).unwrap();
    assert_eq!(result.iter().map(|a| a.id).collect::<Vec<_>>(), vec![ready.id]);
    assert!(!result.iter().any(|a| a.id == blocked.id));
}

#[test]
fn list_ready_excludes_non_pending_actions() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let action = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    update_status(&store, &action.id, ActionStatus::Running, 1).unwrap();

    let result = list_ready(&store, &goal_id, &json!({})).unwrap();
    assert!(result.is_empty());
}

#[test]
fn list_ready_preserves_creation_order() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let first = insert(&store, Action::builder().goal_id(goal_id).build(), 10).unwrap();
    let second = insert(&store, Action::builder().goal_id(goal_id).build(), 20).unwrap();

    let result = list_ready(&store, &goal_id, &json!({})).unwrap();
    assert_eq!(result.iter().map(|a| a.id).collect::<Vec<_>>(), vec![first.id, second.id]);
}

#[test]
fn skip_pending_transitions_only_pending_actions() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let pending = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    let completed = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    update_status(&store, &completed.id, ActionStatus::Completed, 1).unwrap();

    let count = skip_pending(&store, &goal_id, 5).unwrap();
    assert_eq!(count, 1);
    assert_eq!(get(&store, &pending.id).unwrap().unwrap().status, ActionStatus::Skipped);
    assert_eq!(get(&store, &completed.id).unwrap().unwrap().status, ActionStatus::Completed);
}

#[test]
fn skip_pending_then_list_ready_is_empty() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    skip_pending(&store, &goal_id, 1).unwrap();
    assert!(list_ready(&store, &goal_id, &json!({})).unwrap().is_empty());
}

#[test]
fn count_by_status_counts_only_matching_status() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    let running = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    update_status(&store, &running.id, ActionStatus::Running, 1).unwrap();

    assert_eq!(count_by_status(&store, &goal_id, ActionStatus::Pending).unwrap(), 1);
    assert_eq!(count_by_status(&store, &goal_id, ActionStatus::Running).unwrap(), 1);
    assert_eq!(count_by_status(&store, &goal_id, ActionStatus::Completed).unwrap(), 0);
}

#[test]
fn list_primitive_results_excludes_compounds_and_pending() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let compound = insert(&store, Action::builder().goal_id(goal_id).is_compound(true).build(), 0).unwrap();
    update_result(&store, &compound.id, ActionStatus::Completed, "done", 1).unwrap();

    let primitive = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    update_result(&store, &primitive.id, ActionStatus::Completed, "done", 1).unwrap();

    insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap(); // still pending

    let results = list_primitive_results(&store, &goal_id).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, primitive.id);
}

#[test]
fn update_result_sets_status_and_result_text() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let action = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    update_result(&store, &action.id, ActionStatus::Failed, "boom", 9).unwrap();
    let fetched = get(&store, &action.id).unwrap().unwrap();
    assert_eq!(fetched.status, ActionStatus::Failed);
    assert_eq!(fetched.result, Some("boom".to_string()));
}

#[test]
fn set_work_item_id_updates_field() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let action = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    set_work_item_id(&store, &action.id, "wi-1", 2).unwrap();
    assert_eq!(get(&store, &action.id).unwrap().unwrap().work_item_id, Some("wi-1".to_string()));
}

#[test]
fn increment_attempt_count_adds_one() {
    let store = test_store();
    let goal_id = seed_goal(&store);
    let action = insert(&store, Action::builder().goal_id(goal_id).build(), 0).unwrap();
    increment_attempt_count(&store, &action.id, 1).unwrap();
    increment_attempt_count(&store, &action.id, 2).unwrap();
    assert_eq!(get(&store, &action.id).unwrap().unwrap().attempt_count, 2);
}
