// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`WorkItem`] entity (spec §3, §4.D).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::status::WorkItemStatus;

crate::define_id! {
    /// Opaque identity of a [`WorkItem`].
    pub struct WorkItemId;
}

/// Default max retry attempts when a caller passes `0` to `enqueue`.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Truncation limit applied to result/prerequisite strings (spec §4.E
/// step 3, §8 boundary behaviors).
pub const RESULT_TRUNCATION_LIMIT: usize = 4000;

pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// Truncates `s` to at most [`RESULT_TRUNCATION_LIMIT`] bytes, appending
/// [`TRUNCATION_MARKER`] when truncation occurred. Splits on a char
/// boundary at or before the limit so the result is always valid UTF-8.
pub fn truncate_result(s: &str) -> String {
    if s.len() <= RESULT_TRUNCATION_LIMIT {
        return s.to_string();
    }
    let mut end = RESULT_TRUNCATION_LIMIT;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &s[..end], TRUNCATION_MARKER)
}

/// A claimable task in a named queue.
///
/// Invariants: a single claim transition per worker; on failure with
/// remaining attempts the item returns to Pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub queue_name: String,
    pub task_description: String,
    /// JSON payload carrying goal prose, action description, role,
    /// snapshot world state, and a `prerequisite_results` object.
    pub context: Value,
    pub assigned_to: Option<String>,
    pub status: WorkItemStatus,
    pub attempt_count: u32,
    pub max_attempts: u32,
    pub created_at: i64,
    pub assigned_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl WorkItem {
    /// Normalizes a caller-supplied `max_attempts`, substituting the
    /// default when the caller passed `0`.
    pub fn normalize_max_attempts(max_attempts: u32) -> u32 {
        if max_attempts == 0 {
            DEFAULT_MAX_ATTEMPTS
        } else {
            max_attempts
        }
    }

    /// Whether another attempt remains after a failure at the current
    /// `attempt_count`.
    pub fn has_attempts_remaining(&self) -> bool {
        self.attempt_count + 1 < self.max_attempts
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct WorkItemBuilder => WorkItem {
        computed { id: WorkItemId = WorkItemId::new() }
        into { queue_name: String = "goal_test_queue" }
        into { task_description: String = "test task" }
        set { context: Value = serde_json::json!({}) }
        option { assigned_to: String = None }
        set { status: WorkItemStatus = WorkItemStatus::Pending }
        set { attempt_count: u32 = 0 }
        set { max_attempts: u32 = DEFAULT_MAX_ATTEMPTS }
        set { created_at: i64 = 0 }
        option { assigned_at: i64 = None }
        option { completed_at: i64 = None }
        option { result: String = None }
        option { error: String = None }
    }
}

#[cfg(test)]
#[path = "work_item_tests.rs"]
mod tests;
