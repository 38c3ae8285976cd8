// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent FIFO work queue (spec §4.D).

use rusqlite::{params, Row};
use scaffold_core::{WorkItem, WorkItemId, WorkItemStatus};
use serde_json::Value;

use crate::error::StoreError;
use crate::handle::StoreHandle;

fn map_row(row: &Row<'_>) -> rusqlite::Result<WorkItem> {
    let id: String = row.get("id")?;
    let context: String = row.get("context")?;
    let status_code: i64 = row.get("status")?;
    Ok(WorkItem {
        id: WorkItemId::from_string(id),
        queue_name: row.get("queue_name")?,
        task_description: row.get("task_description")?,
        context: serde_json::from_str(&context).unwrap_or_else(|_| serde_json::json!({})),
        assigned_to: row.get("assigned_to")?,
        status: WorkItemStatus::from_code(status_code).unwrap_or(WorkItemStatus::Pending),
        attempt_count: row.get::<_, i64>("attempt_count")? as u32,
        max_attempts: row.get::<_, i64>("max_attempts")? as u32,
        created_at: row.get("created_at")?,
        assigned_at: row.get("assigned_at")?,
        completed_at: row.get("completed_at")?,
        result: row.get("result")?,
        error: row.get("error")?,
    })
}

const SELECT_COLUMNS: &str = "id, queue_name, task_description, context, assigned_to, status, \
     attempt_count, max_attempts, created_at, assigned_at, completed_at, result, error";

/// Inserts a Pending work item with `attempt_count = 0`. `max_attempts`
/// of `0` is normalized to [`scaffold_core::DEFAULT_MAX_ATTEMPTS`].
pub fn enqueue(
    store: &StoreHandle,
    queue_name: &str,
    task_description: &str,
    context: &Value,
    max_attempts: u32,
    now_ms: i64,
) -> Result<WorkItem, StoreError> {
    let item = WorkItem {
        id: WorkItemId::new(),
        queue_name: queue_name.to_string(),
        task_description: task_description.to_string(),
        context: context.clone(),
        assigned_to: None,
        status: WorkItemStatus::Pending,
        attempt_count: 0,
        max_attempts: WorkItem::normalize_max_attempts(max_attempts),
        created_at: now_ms,
        assigned_at: None,
        completed_at: None,
        result: None,
        error: None,
    };
    store.exec(
        "INSERT INTO work_items (id, queue_name, task_description, context, assigned_to, status, \
         attempt_count, max_attempts, created_at, assigned_at, completed_at, result, error) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            item.id.as_str(),
            item.queue_name,
            item.task_description,
            item.context.to_string(),
            item.assigned_to,
            item.status.code(),
            item.attempt_count,
            item.max_attempts,
            item.created_at,
            item.assigned_at,
            item.completed_at,
            item.result,
            item.error,
        ],
    )?;
    Ok(item)
}

/// Transitionally selects the oldest Pending item for `queue_name` and
/// marks it Assigned to `worker_id` in a single transaction. Ties are
/// broken by `created_at`, then `id` lexicographic. At-most-one worker
/// observes each item.
pub fn claim(
    store: &StoreHandle,
    queue_name: &str,
    worker_id: &str,
    now_ms: i64,
) -> Result<Option<WorkItem>, StoreError> {
    store.begin()?;
    let candidate: Option<String> = match store.query_one(
        "SELECT id FROM work_items WHERE queue_name = ?1 AND status = ?2 \
         ORDER BY created_at, id LIMIT 1",
        params![queue_name, WorkItemStatus::Pending.code()],
        |row| row.get(0),
    ) {
        Ok(v) => v,
        Err(e) => {
            store.rollback()?;
            return Err(e);
        }
    };

    let Some(item_id) = candidate else {
        store.rollback()?;
        return Ok(None);
    };

    if let Err(e) = store.exec(
        "UPDATE work_items SET status = ?1, assigned_to = ?2, assigned_at = ?3 WHERE id = ?4",
        params![WorkItemStatus::Assigned.code(), worker_id, now_ms, item_id],
    ) {
        store.rollback()?;
        return Err(e);
    }

    let claimed = store.query_one(
        &format!("SELECT {SELECT_COLUMNS} FROM work_items WHERE id = ?1"),
        [item_id.as_str()],
        map_row,
    );
    match claimed {
        Ok(item) => {
            store.commit()?;
            Ok(item)
        }
        Err(e) => {
            store.rollback()?;
            Err(e)
        }
    }
}

/// Assigned -> Completed.
pub fn complete(store: &StoreHandle, item_id: &WorkItemId, result: &str, now_ms: i64) -> Result<(), StoreError> {
    store.exec(
        "UPDATE work_items SET status = ?1, result = ?2, completed_at = ?3 WHERE id = ?4",
        params![WorkItemStatus::Completed.code(), result, now_ms, item_id.as_str()],
    )?;
    Ok(())
}

/// If `attempt_count + 1 < max_attempts`, increments and returns the item
/// to Pending; otherwise sets Failed and records `error`.
pub fn fail(store: &StoreHandle, item_id: &WorkItemId, error: &str, now_ms: i64) -> Result<(), StoreError> {
    let item = store.query_one(
        &format!("SELECT {SELECT_COLUMNS} FROM work_items WHERE id = ?1"),
        [item_id.as_str()],
        map_row,
    )?;
    let Some(item) = item else {
        return Ok(());
    };
    if item.has_attempts_remaining() {
        store.exec(
            "UPDATE work_items SET status = ?1, attempt_count = attempt_count + 1, \
             assigned_to = NULL, error = ?2 WHERE id = ?3",
            params![WorkItemStatus::Pending.code(), error, item_id.as_str()],
        )?;
    } else {
        store.exec(
            "UPDATE work_items SET status = ?1, error = ?2, completed_at = ?3 WHERE id = ?4",
            params![WorkItemStatus::Failed.code(), error, now_ms, item_id.as_str()],
        )?;
    }
    Ok(())
}

/// Cleanup path on dispatch failure.
pub fn remove(store: &StoreHandle, item_id: &WorkItemId) -> Result<usize, StoreError> {
    store.exec("DELETE FROM work_items WHERE id = ?1", [item_id.as_str()])
}

pub fn pending_count(store: &StoreHandle, queue_name: &str) -> Result<i64, StoreError> {
    Ok(store
        .query_one(
            "SELECT COUNT(*) FROM work_items WHERE queue_name = ?1 AND status = ?2",
            params![queue_name, WorkItemStatus::Pending.code()],
            |row| row.get(0),
        )?
        .unwrap_or(0))
}

pub fn get(store: &StoreHandle, item_id: &WorkItemId) -> Result<Option<WorkItem>, StoreError> {
    store.query_one(
        &format!("SELECT {SELECT_COLUMNS} FROM work_items WHERE id = ?1"),
        [item_id.as_str()],
        map_row,
    )
}

#[cfg(test)]
#[path = "work_queue_tests.rs"]
mod tests;
