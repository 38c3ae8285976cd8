// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status enums for goals, actions, and work items (spec §3, §6.4).
//!
//! Integer encodings match §6.4 exactly: Goal {Planning=0, Active=1,
//! Paused=2, Completed=3, Failed=4}; Action {Pending=0, Running=1,
//! Completed=2, Failed=3, Skipped=4}.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a [`crate::goal::Goal`].
///
/// Lifecycle: Planning on create -> Active when supervisor spawned and
/// plan finalized -> Paused when supervisor killed via user pause ->
/// Completed when world-state satisfies goal-state -> Failed on explicit
/// cancel or unrecoverable error. Completed/Failed are terminal. There is
/// no separate Cancelled status: `cancel_goal` sets status to Failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Planning = 0,
    Active = 1,
    Paused = 2,
    Completed = 3,
    Failed = 4,
}

crate::simple_display! {
    GoalStatus {
        Planning => "planning",
        Active => "active",
        Paused => "paused",
        Completed => "completed",
        Failed => "failed",
    }
}

impl GoalStatus {
    /// Parses the exact lowercase keyword used on the wire and in storage.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "planning" => Self::Planning,
            "active" => Self::Active,
            "paused" => Self::Paused,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => return None,
        })
    }

    /// Decode the integer encoding stored in the `status` column.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::Planning,
            1 => Self::Active,
            2 => Self::Paused,
            3 => Self::Completed,
            4 => Self::Failed,
            _ => return None,
        })
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Lifecycle status of an [`crate::action::Action`].
///
/// `update_status` strictly rejects `"in_progress"` and any keyword outside
/// this five-value set, even though a nearby subsystem uses `"in_progress"`
/// for a different entity (spec §9 open question (c)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending = 0,
    Running = 1,
    Completed = 2,
    Failed = 3,
    Skipped = 4,
}

crate::simple_display! {
    ActionStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Skipped => "skipped",
    }
}

impl ActionStatus {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "skipped" => Self::Skipped,
            _ => return None,
        })
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::Pending,
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::Failed,
            4 => Self::Skipped,
            _ => return None,
        })
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Skipped)
    }
}

/// Status of a queued [`crate::work_item::WorkItem`] (spec §3, §4.D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    Pending = 0,
    Assigned = 1,
    Completed = 2,
    Failed = 3,
}

crate::simple_display! {
    WorkItemStatus {
        Pending => "pending",
        Assigned => "assigned",
        Completed => "completed",
        Failed => "failed",
    }
}

impl WorkItemStatus {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "pending" => Self::Pending,
            "assigned" => Self::Assigned,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => return None,
        })
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => Self::Pending,
            1 => Self::Assigned,
            2 => Self::Completed,
            3 => Self::Failed,
            _ => return None,
        })
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
