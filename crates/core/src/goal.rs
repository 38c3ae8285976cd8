// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Goal`] entity (spec §3).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::status::GoalStatus;

crate::define_id! {
    /// Opaque identity of a [`Goal`].
    pub struct GoalId;
}

/// A desired boolean configuration the Core works toward.
///
/// `queue_name` is non-empty after insert; `world_state` and `goal_state`
/// are always valid JSON objects (default `{}`); `supervisor_pid > 0`
/// implies the supervisor *was* alive at `supervisor_started_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub description: String,
    /// Mapping from assertion-key to true — every key listed must become
    /// true for completion.
    pub goal_state: Value,
    /// Mapping from assertion-key to bool — the current belief.
    pub world_state: Value,
    pub summary: Option<String>,
    pub queue_name: String,
    /// 0 when no supervisor is running.
    pub supervisor_pid: i64,
    /// ms epoch; 0 when no supervisor has been started.
    pub supervisor_started_at: i64,
    pub status: GoalStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Goal {
    /// Construct a queue name in the style the source auto-generates when
    /// one is omitted: `goal_<uuid>` (spec §9 open question (b): treated
    /// as globally unique, not namespaced).
    pub fn default_queue_name(id: &GoalId) -> String {
        format!("goal_{id}")
    }

    /// True once the supervisor has recorded a live PID.
    pub fn has_supervisor(&self) -> bool {
        self.supervisor_pid > 0
    }
}

/// Returns an empty JSON object, the default for `goal_state`/`world_state`.
pub fn empty_object() -> Value {
    Value::Object(Map::new())
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct GoalBuilder => Goal {
        computed { id: GoalId = GoalId::new() }
        into { name: String = "test goal" }
        into { description: String = "" }
        option { summary: String = None }
        set { goal_state: Value = empty_object() }
        set { world_state: Value = empty_object() }
        into { queue_name: String = "goal_test_queue" }
        set { supervisor_pid: i64 = 0 }
        set { supervisor_started_at: i64 = 0 }
        set { status: GoalStatus = GoalStatus::Planning }
        set { created_at: i64 = 0 }
        set { updated_at: i64 = 0 }
    }
}

#[cfg(test)]
#[path = "goal_tests.rs"]
mod tests;
