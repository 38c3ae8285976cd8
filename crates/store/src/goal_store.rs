// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed CRUD over [`Goal`] rows (spec §4.B).

use rusqlite::{params, Row};
use scaffold_core::{Goal, GoalId, GoalStatus};
use serde_json::Value;

use crate::error::StoreError;
use crate::handle::StoreHandle;

fn map_row(row: &Row<'_>) -> rusqlite::Result<Goal> {
    let id: String = row.get("id")?;
    let status_code: i64 = row.get("status")?;
    let goal_state: String = row.get("goal_state")?;
    let world_state: String = row.get("world_state")?;
    Ok(Goal {
        id: GoalId::from_string(id),
        name: row.get("name")?,
        description: row.get("description")?,
        // Malformed JSON downgrades to an empty object rather than failing
        // the read (spec §7 propagation policy).
        goal_state: serde_json::from_str(&goal_state).unwrap_or_else(|_| serde_json::json!({})),
        world_state: serde_json::from_str(&world_state).unwrap_or_else(|_| serde_json::json!({})),
        summary: row.get("summary")?,
        queue_name: row.get("queue_name")?,
        supervisor_pid: row.get("supervisor_pid")?,
        supervisor_started_at: row.get("supervisor_started_at")?,
        status: GoalStatus::from_code(status_code).unwrap_or(GoalStatus::Planning),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

const SELECT_COLUMNS: &str = "id, name, description, goal_state, world_state, summary, status, \
     queue_name, supervisor_pid, supervisor_started_at, created_at, updated_at";

/// Inserts `goal`, generating a fresh id and stamping `created_at`/
/// `updated_at` with `now_ms`. `queue_name` defaults to
/// `Goal::default_queue_name` when the caller passed an empty string.
pub fn insert(store: &StoreHandle, mut goal: Goal, now_ms: i64) -> Result<Goal, StoreError> {
    goal.id = GoalId::new();
    if goal.queue_name.is_empty() {
        goal.queue_name = Goal::default_queue_name(&goal.id);
    }
    goal.created_at = now_ms;
    goal.updated_at = now_ms;
    store.exec(
        "INSERT INTO goals (id, name, description, goal_state, world_state, summary, status, \
         queue_name, supervisor_pid, supervisor_started_at, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            goal.id.as_str(),
            goal.name,
            goal.description,
            goal.goal_state.to_string(),
            goal.world_state.to_string(),
            goal.summary,
            goal.status.code(),
            goal.queue_name,
            goal.supervisor_pid,
            goal.supervisor_started_at,
            goal.created_at,
            goal.updated_at,
        ],
    )?;
    Ok(goal)
}

pub fn get(store: &StoreHandle, id: &GoalId) -> Result<Option<Goal>, StoreError> {
    store.query_one(
        &format!("SELECT {SELECT_COLUMNS} FROM goals WHERE id = ?1"),
        [id.as_str()],
        map_row,
    )
}

pub fn list(store: &StoreHandle) -> Result<Vec<Goal>, StoreError> {
    store.query_list(
        &format!("SELECT {SELECT_COLUMNS} FROM goals ORDER BY created_at, id"),
        [],
        map_row,
    )
}

/// Replaces the stored `world_state` object. Merge semantics live in the
/// `goap` crate; this layer stores whatever JSON it is given.
pub fn update_world_state(
    store: &StoreHandle,
    id: &GoalId,
    world_state: &Value,
    now_ms: i64,
) -> Result<(), StoreError> {
    store.exec(
        "UPDATE goals SET world_state = ?1, updated_at = ?2 WHERE id = ?3",
        params![world_state.to_string(), now_ms, id.as_str()],
    )?;
    Ok(())
}

pub fn update_status(
    store: &StoreHandle,
    id: &GoalId,
    status: GoalStatus,
    now_ms: i64,
) -> Result<(), StoreError> {
    store.exec(
        "UPDATE goals SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.code(), now_ms, id.as_str()],
    )?;
    Ok(())
}

/// Stamps a freshly spawned supervisor's PID and start time.
pub fn set_supervisor(
    store: &StoreHandle,
    id: &GoalId,
    pid: i64,
    started_at: i64,
) -> Result<(), StoreError> {
    store.exec(
        "UPDATE goals SET supervisor_pid = ?1, supervisor_started_at = ?2, updated_at = ?2 WHERE id = ?3",
        params![pid, started_at, id.as_str()],
    )?;
    Ok(())
}

/// Clears a goal's supervisor PID (process exited, was reaped, or was
/// found stale).
pub fn clear_supervisor(store: &StoreHandle, id: &GoalId, now_ms: i64) -> Result<(), StoreError> {
    store.exec(
        "UPDATE goals SET supervisor_pid = 0, updated_at = ?1 WHERE id = ?2",
        params![now_ms, id.as_str()],
    )?;
    Ok(())
}

pub fn update_summary(
    store: &StoreHandle,
    id: &GoalId,
    summary: Option<&str>,
    now_ms: i64,
) -> Result<(), StoreError> {
    store.exec(
        "UPDATE goals SET summary = ?1, updated_at = ?2 WHERE id = ?3",
        params![summary, now_ms, id.as_str()],
    )?;
    Ok(())
}

/// Goals whose status is Active and whose `supervisor_pid > 0` — the
/// candidate set for `reap_supervisors`/`check_stale` (spec §4.F).
pub fn list_with_live_supervisor(store: &StoreHandle) -> Result<Vec<Goal>, StoreError> {
    store.query_list(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM goals WHERE status = ?1 AND supervisor_pid > 0 ORDER BY id"
        ),
        params![GoalStatus::Active.code()],
        map_row,
    )
}

/// Active goals with no running supervisor — the candidate set for
/// `respawn_dead` (spec §4.F).
pub fn list_active_without_supervisor(store: &StoreHandle) -> Result<Vec<Goal>, StoreError> {
    store.query_list(
        &format!(
            "SELECT {SELECT_COLUMNS} FROM goals WHERE status = ?1 AND supervisor_pid = 0 ORDER BY id"
        ),
        params![GoalStatus::Active.code()],
        map_row,
    )
}

/// Any goal with a recorded (possibly stale) supervisor PID — the
/// candidate set for `check_stale` on startup (spec §4.F).
pub fn list_with_recorded_supervisor(store: &StoreHandle) -> Result<Vec<Goal>, StoreError> {
    store.query_list(
        &format!("SELECT {SELECT_COLUMNS} FROM goals WHERE supervisor_pid > 0 ORDER BY id"),
        [],
        map_row,
    )
}

#[cfg(test)]
#[path = "goal_store_tests.rs"]
mod tests;
