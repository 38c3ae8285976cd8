// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Idempotent schema application (spec §6.4).

use rusqlite::Connection;

use crate::error::StoreError;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS goals (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    goal_state TEXT NOT NULL DEFAULT '{}',
    world_state TEXT NOT NULL DEFAULT '{}',
    summary TEXT,
    status INTEGER NOT NULL DEFAULT 0,
    queue_name TEXT NOT NULL,
    supervisor_pid INTEGER NOT NULL DEFAULT 0,
    supervisor_started_at INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS actions (
    id TEXT PRIMARY KEY,
    goal_id TEXT NOT NULL REFERENCES goals(id) ON DELETE CASCADE,
    parent_action_id TEXT REFERENCES actions(id) ON DELETE CASCADE,
    work_item_id TEXT,
    description TEXT NOT NULL,
    preconditions TEXT NOT NULL DEFAULT '[]',
    effects TEXT NOT NULL DEFAULT '[]',
    is_compound INTEGER NOT NULL DEFAULT 0,
    status INTEGER NOT NULL DEFAULT 0,
    role TEXT NOT NULL DEFAULT 'implementation',
    result TEXT,
    attempt_count INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_actions_goal_id ON actions(goal_id);
CREATE INDEX IF NOT EXISTS idx_actions_goal_id_status ON actions(goal_id, status);
CREATE INDEX IF NOT EXISTS idx_actions_parent_action_id ON actions(parent_action_id);

CREATE TABLE IF NOT EXISTS work_items (
    id TEXT PRIMARY KEY,
    queue_name TEXT NOT NULL,
    task_description TEXT NOT NULL,
    context TEXT NOT NULL DEFAULT '{}',
    assigned_to TEXT,
    status INTEGER NOT NULL DEFAULT 0,
    attempt_count INTEGER NOT NULL DEFAULT 0,
    max_attempts INTEGER NOT NULL DEFAULT 3,
    created_at INTEGER NOT NULL,
    assigned_at INTEGER,
    completed_at INTEGER,
    result TEXT,
    error TEXT
);

CREATE INDEX IF NOT EXISTS idx_work_items_queue_name_status ON work_items(queue_name, status);
"#;

/// Applies the schema to `conn`, creating tables/indexes if absent, and
/// enables cascading foreign keys for the connection.
pub fn apply(conn: &Connection) -> Result<(), StoreError> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
