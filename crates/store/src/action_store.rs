// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed CRUD over [`Action`] rows (spec §4.B).

use rusqlite::{params, Row};
use scaffold_core::{Action, ActionId, ActionStatus, GoalId};
use serde_json::Value;

use crate::error::StoreError;
use crate::handle::StoreHandle;

fn map_row(row: &Row<'_>) -> rusqlite::Result<Action> {
    let id: String = row.get("id")?;
    let goal_id: String = row.get("goal_id")?;
    let parent_action_id: Option<String> = row.get("parent_action_id")?;
    let preconditions: String = row.get("preconditions")?;
    let effects: String = row.get("effects")?;
    let status_code: i64 = row.get("status")?;
    Ok(Action {
        id: ActionId::from_string(id),
        goal_id: GoalId::from_string(goal_id),
        parent_action_id: parent_action_id.map(ActionId::from_string),
        work_item_id: row.get("work_item_id")?,
        description: row.get("description")?,
        preconditions: serde_json::from_str(&preconditions).unwrap_or_default(),
        effects: serde_json::from_str(&effects).unwrap_or_default(),
        is_compound: row.get::<_, i64>("is_compound")? != 0,
        status: ActionStatus::from_code(status_code).unwrap_or(ActionStatus::Pending),
        role: row.get("role")?,
        result: row.get("result")?,
        attempt_count: row.get::<_, i64>("attempt_count")? as u32,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

const SELECT_COLUMNS: &str = "id, goal_id, parent_action_id, work_item_id, description, \
     preconditions, effects, is_compound, status, role, result, attempt_count, created_at, \
     updated_at";

/// Inserts `action`, generating a fresh id and stamping timestamps.
pub fn insert(store: &StoreHandle, mut action: Action, now_ms: i64) -> Result<Action, StoreError> {
    action.id = ActionId::new();
    action.created_at = now_ms;
    action.updated_at = now_ms;
    store.exec(
        "INSERT INTO actions (id, goal_id, parent_action_id, work_item_id, description, \
         preconditions, effects, is_compound, status, role, result, attempt_count, created_at, \
         updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            action.id.as_str(),
            action.goal_id.as_str(),
            action.parent_action_id.as_ref().map(|p| p.as_str()),
            action.work_item_id,
            action.description,
            serde_json::to_string(&action.preconditions).unwrap_or_else(|_| "[]".to_string()),
            serde_json::to_string(&action.effects).unwrap_or_else(|_| "[]".to_string()),
            action.is_compound as i64,
            action.status.code(),
            action.role,
            action.result,
            action.attempt_count,
            action.created_at,
            action.updated_at,
        ],
    )?;
    Ok(action)
}

pub fn get(store: &StoreHandle, id: &ActionId) -> Result<Option<Action>, StoreError> {
    store.query_one(
        &format!("SELECT {SELECT_COLUMNS} FROM actions WHERE id = ?1"),
        [id.as_str()],
        map_row,
    )
}

pub fn list_by_goal(store: &StoreHandle, goal_id: &GoalId) -> Result<Vec<Action>, StoreError> {
    store.query_list(
        &format!("SELECT {SELECT_COLUMNS} FROM actions WHERE goal_id = ?1 ORDER BY created_at, id"),
        [goal_id.as_str()],
        map_row,
    )
}

pub fn list_by_parent(store: &StoreHandle, parent_id: &ActionId) -> Result<Vec<Action>, StoreError> {
    store.query_list(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM actions WHERE parent_action_id = ?1 ORDER BY created_at, id"
        ),
        [parent_id.as_str()],
        map_row,
    )
}

pub fn list_top_level(store: &StoreHandle, goal_id: &GoalId) -> Result<Vec<Action>, StoreError> {
    store.query_list(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM actions WHERE goal_id = ?1 AND parent_action_id IS NULL \
             ORDER BY created_at, id"
        ),
        [goal_id.as_str()],
        map_row,
    )
}

/// Every Pending action of `goal_id` whose preconditions are all present
/// and true in `world_state`, in creation order. Precondition checking
/// happens here in application code, not SQL — assertion identity is
/// purely by key name (spec §4.B).
pub fn list_ready(
    store: &StoreHandle,
    goal_id: &GoalId,
    world_state: &Value,
) -> Result<Vec<Action>, StoreError> {
    let pending = store.query_list(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM actions WHERE goal_id = ?1 AND status = ?2 \
             ORDER BY created_at, id"
        ),
        params![goal_id.as_str(), ActionStatus::Pending.code()],
        map_row,
    )?;
    Ok(pending
        .into_iter()
        .filter(|a| {
            let preconds = serde_json::to_value(&a.preconditions).unwrap_or(Value::Null);
            scaffold_goap::preconditions_met(Some(&preconds), world_state)
        })
        .collect())
}

/// Transitions every Pending action of `goal_id` to Skipped (replan
/// primitive).
pub fn skip_pending(store: &StoreHandle, goal_id: &GoalId, now_ms: i64) -> Result<usize, StoreError> {
    store.exec(
        "UPDATE actions SET status = ?1, updated_at = ?2 WHERE goal_id = ?3 AND status = ?4",
        params![
            ActionStatus::Skipped.code(),
            now_ms,
            goal_id.as_str(),
            ActionStatus::Pending.code(),
        ],
    )
}

/// The admission-control signal for the worker dispatcher (spec §4.E):
/// how many of this goal's actions currently hold `status`.
pub fn count_by_status(
    store: &StoreHandle,
    goal_id: &GoalId,
    status: ActionStatus,
) -> Result<i64, StoreError> {
    Ok(store
        .query_one(
            "SELECT COUNT(*) FROM actions WHERE goal_id = ?1 AND status = ?2",
            params![goal_id.as_str(), status.code()],
            |row| row.get(0),
        )?
        .unwrap_or(0))
}

/// Every action whose `effects` include at least one key shared with
/// `preconditions_of`, restricted to Completed actions of `goal_id` — the
/// candidate set for the prerequisite-results algorithm (spec §4.E step
/// 3). Filtering on the shared-key test happens in application code.
pub fn list_completed(store: &StoreHandle, goal_id: &GoalId) -> Result<Vec<Action>, StoreError> {
    store.query_list(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM actions WHERE goal_id = ?1 AND status = ?2 \
             ORDER BY created_at, id"
        ),
        params![goal_id.as_str(), ActionStatus::Completed.code()],
        map_row,
    )
}

/// Every primitive action of `goal_id` that has ever completed or
/// failed — used by `get_action_results` to report exactly the
/// primitives, never the compound planning nodes (spec §8 scenario 1).
pub fn list_primitive_results(store: &StoreHandle, goal_id: &GoalId) -> Result<Vec<Action>, StoreError> {
    store.query_list(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM actions WHERE goal_id = ?1 AND is_compound = 0 \
             AND status IN (?2, ?3) ORDER BY created_at, id"
        ),
        params![
            goal_id.as_str(),
            ActionStatus::Completed.code(),
            ActionStatus::Failed.code(),
        ],
        map_row,
    )
}

/// Strictly validates `status` against the five-value set (spec §9 open
/// question (c): `"in_progress"` is rejected here even though a nearby
/// subsystem uses that token for a different entity). Callers are
/// expected to have already parsed the status string with
/// [`ActionStatus::parse`] and reject `None` themselves; this function
/// exists to keep that rejection colocated with the write path.
pub fn update_status(
    store: &StoreHandle,
    id: &ActionId,
    status: ActionStatus,
    now_ms: i64,
) -> Result<(), StoreError> {
    store.exec(
        "UPDATE actions SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.code(), now_ms, id.as_str()],
    )?;
    Ok(())
}

pub fn update_result(
    store: &StoreHandle,
    id: &ActionId,
    status: ActionStatus,
    result: &str,
    now_ms: i64,
) -> Result<(), StoreError> {
    store.exec(
        "UPDATE actions SET status = ?1, result = ?2, updated_at = ?3 WHERE id = ?4",
        params![status.code(), result, now_ms, id.as_str()],
    )?;
    Ok(())
}

pub fn set_work_item_id(
    store: &StoreHandle,
    id: &ActionId,
    work_item_id: &str,
    now_ms: i64,
) -> Result<(), StoreError> {
    store.exec(
        "UPDATE actions SET work_item_id = ?1, updated_at = ?2 WHERE id = ?3",
        params![work_item_id, now_ms, id.as_str()],
    )?;
    Ok(())
}

pub fn increment_attempt_count(store: &StoreHandle, id: &ActionId, now_ms: i64) -> Result<(), StoreError> {
    store.exec(
        "UPDATE actions SET attempt_count = attempt_count + 1, updated_at = ?1 WHERE id = ?2",
        params![now_ms, id.as_str()],
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "action_store_tests.rs"]
mod tests;
