// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Action`] entity (spec §3).

use serde::{Deserialize, Serialize};

use crate::goal::GoalId;
use crate::status::ActionStatus;

crate::define_id! {
    /// Opaque identity of an [`Action`].
    pub struct ActionId;
}

/// Default role assigned to an action when none is given.
pub const DEFAULT_ROLE: &str = "implementation";

/// A step toward a goal: either a compound planning node holding children,
/// or a primitive unit of dispatchable work.
///
/// Compound actions are never dispatched. A primitive action with
/// non-empty `preconditions` is not dispatched until every key appears
/// with value true in its goal's world state. Children of a deleted
/// compound are deleted (tree cascade) — enforced by the store, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub goal_id: GoalId,
    /// Compound parent; `None` for top-level actions.
    pub parent_action_id: Option<ActionId>,
    /// Set when dispatched.
    pub work_item_id: Option<String>,
    pub description: String,
    /// Ordered sequence of assertion-keys; the action becomes ready when
    /// every key is true in the goal's world state.
    pub preconditions: Vec<String>,
    /// Ordered sequence of assertion-keys this action promises to set
    /// true on success.
    pub effects: Vec<String>,
    /// `true` => a planning node holding children, never directly
    /// executable.
    pub is_compound: bool,
    pub status: ActionStatus,
    pub role: String,
    /// Free text; set on completion/failure.
    pub result: Option<String>,
    pub attempt_count: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Action {
    /// A primitive action is dispatchable; a compound one never is.
    pub fn is_primitive(&self) -> bool {
        !self.is_compound
    }
}

#[cfg(any(test, feature = "test-support"))]
crate::builder! {
    pub struct ActionBuilder => Action {
        computed { id: ActionId = ActionId::new() }
        set { goal_id: GoalId = GoalId::new() }
        option { parent_action_id: ActionId = None }
        option { work_item_id: String = None }
        into { description: String = "test action" }
        set { preconditions: Vec<String> = Vec::new() }
        set { effects: Vec<String> = Vec::new() }
        set { is_compound: bool = false }
        set { status: ActionStatus = ActionStatus::Pending }
        into { role: String = DEFAULT_ROLE }
        option { result: String = None }
        set { attempt_count: u32 = 0 }
        set { created_at: i64 = 0 }
        set { updated_at: i64 = 0 }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
