// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The orchestrator tool surface (spec §4.G): goal-level commands driving
//! the store, GOAP evaluator, and supervisor lifecycle manager.

use serde_json::{json, Value};

use scaffold_core::{Action, ActionId, ActionStatus, Goal, GoalId, GoalStatus};
use scaffold_dispatch::Spawner;
use scaffold_store::{action_store, goal_store, StoreHandle};
use scaffold_supervisor::{kill_supervisor, spawn_supervisor, supervisor_alive, SupervisorConfig};

use crate::error::ToolError;

const EXECUTE_PLAN_PREAMBLE: &str = "\
Decompose the objective below into a tree of actions. Compound actions \
are planning nodes that hold children and carry `preconditions`/`effects` \
lists naming boolean assertion keys; primitive actions are directly \
dispatchable and carry a `role` tag (implementation, code_review, \
architecture_review, design_review, pm_review, testing). Include a \
verification phase as a primitive action whose effects assert the goal \
is actually done, not merely attempted.\n\n\
Plan:\n";

/// `execute_plan(plan_text)` (spec §4.G). Touches no store; returns a
/// decomposition-instruction payload and asks the caller to reset
/// conversational state.
pub fn execute_plan(plan_text: &str) -> Value {
    json!({
        "instructions": format!("{EXECUTE_PLAN_PREAMBLE}{plan_text}"),
        "clear_history": true,
    })
}

fn goal_summary_json(store: &StoreHandle, goal: &Goal, now_ms: i64) -> Result<Value, ToolError> {
    let progress = scaffold_goap::progress(&goal.goal_state, &goal.world_state);
    let running = supervisor_alive(store, &goal.id, now_ms)?;
    Ok(json!({
        "id": goal.id.to_string(),
        "name": goal.name,
        "status": goal.status.to_string(),
        "progress": format!("{}/{}", progress.satisfied, progress.total),
        "summary": goal.summary,
        "supervisor_running": running,
    }))
}

/// `list_goals()` (spec §4.G).
pub fn list_goals(store: &StoreHandle, now_ms: i64) -> Result<Value, ToolError> {
    let goals = goal_store::list(store)?;
    let mut entries = Vec::with_capacity(goals.len());
    for goal in &goals {
        entries.push(goal_summary_json(store, goal, now_ms)?);
    }
    Ok(json!({ "goals": entries }))
}

fn action_node(store: &StoreHandle, action: &Action) -> Result<Value, ToolError> {
    let children = action_store::list_by_parent(store, &action.id)?;
    let mut child_nodes = Vec::with_capacity(children.len());
    for child in &children {
        child_nodes.push(action_node(store, child)?);
    }
    Ok(json!({
        "id": action.id.to_string(),
        "description": action.description,
        "status": action.status.to_string(),
        "role": action.role,
        "is_compound": action.is_compound,
        "result": action.result,
        "children": child_nodes,
    }))
}

/// `goal_status(goal_id)` (spec §4.G): full goal record, action counts by
/// status, and a nested action tree rooted at top-level actions.
pub fn goal_status(store: &StoreHandle, goal_id: &GoalId, now_ms: i64) -> Result<Value, ToolError> {
    let goal = goal_store::get(store, goal_id)?
        .ok_or_else(|| ToolError::GoalNotFound(goal_id.to_string()))?;

    let counts = json!({
        "pending": action_store::count_by_status(store, goal_id, ActionStatus::Pending)?,
        "running": action_store::count_by_status(store, goal_id, ActionStatus::Running)?,
        "completed": action_store::count_by_status(store, goal_id, ActionStatus::Completed)?,
        "failed": action_store::count_by_status(store, goal_id, ActionStatus::Failed)?,
        "skipped": action_store::count_by_status(store, goal_id, ActionStatus::Skipped)?,
    });

    let top_level = action_store::list_top_level(store, goal_id)?;
    let mut tree = Vec::with_capacity(top_level.len());
    for action in &top_level {
        tree.push(action_node(store, action)?);
    }

    let progress = scaffold_goap::progress(&goal.goal_state, &goal.world_state);
    let running = supervisor_alive(store, goal_id, now_ms)?;

    Ok(json!({
        "id": goal.id.to_string(),
        "name": goal.name,
        "description": goal.description,
        "status": goal.status.to_string(),
        "goal_state": goal.goal_state,
        "world_state": goal.world_state,
        "summary": goal.summary,
        "queue_name": goal.queue_name,
        "progress": { "satisfied": progress.satisfied, "total": progress.total, "complete": progress.complete },
        "supervisor_running": running,
        "action_counts": counts,
        "actions": tree,
    }))
}

/// `start_goal(goal_id)` (spec §4.G): requires status Planning or Paused
/// and no live supervisor. Paused transitions to Active before spawn;
/// Planning is left as-is so the (out-of-scope) planner phase can
/// promote it later.
pub fn start_goal(
    store: &StoreHandle,
    spawner: &dyn Spawner,
    config: &SupervisorConfig,
    goal_id: &GoalId,
    now_ms: i64,
) -> Result<Value, ToolError> {
    let goal = goal_store::get(store, goal_id)?
        .ok_or_else(|| ToolError::GoalNotFound(goal_id.to_string()))?;

    if goal.status != GoalStatus::Planning && goal.status != GoalStatus::Paused {
        return Err(ToolError::InvalidTransition);
    }
    if supervisor_alive(store, goal_id, now_ms)? {
        return Err(ToolError::AlreadyRunning);
    }

    if goal.status == GoalStatus::Paused {
        goal_store::update_status(store, goal_id, GoalStatus::Active, now_ms)?;
    }

    let pid = spawn_supervisor(store, spawner, config, goal_id, now_ms)?;
    Ok(json!({ "goal_id": goal_id.to_string(), "supervisor_pid": pid }))
}

/// `pause_goal(goal_id)` (spec §4.G): requires status Active; delegates
/// to `kill_supervisor`, which itself clears the PID and sets Paused.
pub fn pause_goal(store: &StoreHandle, goal_id: &GoalId, now_ms: i64) -> Result<Value, ToolError> {
    let goal = goal_store::get(store, goal_id)?
        .ok_or_else(|| ToolError::GoalNotFound(goal_id.to_string()))?;

    if goal.status != GoalStatus::Active {
        return Err(ToolError::InvalidTransition);
    }

    kill_supervisor(store, goal_id, now_ms)?;
    Ok(json!({ "goal_id": goal_id.to_string(), "status": GoalStatus::Paused.to_string() }))
}

/// `cancel_goal(goal_id)` (spec §4.G): rejects terminal statuses; kills
/// the supervisor if any; sets status to Failed.
pub fn cancel_goal(store: &StoreHandle, goal_id: &GoalId, now_ms: i64) -> Result<Value, ToolError> {
    let goal = goal_store::get(store, goal_id)?
        .ok_or_else(|| ToolError::GoalNotFound(goal_id.to_string()))?;

    if goal.status.is_terminal() {
        return Err(ToolError::TerminalState);
    }

    if goal.has_supervisor() {
        match kill_supervisor(store, goal_id, now_ms) {
            Ok(()) | Err(scaffold_supervisor::SupervisorError::NotRunning) => {}
            Err(e) => return Err(e.into()),
        }
    }
    goal_store::update_status(store, goal_id, GoalStatus::Failed, now_ms)?;
    Ok(json!({ "goal_id": goal_id.to_string(), "status": GoalStatus::Failed.to_string() }))
}

/// `get_action_results(goal_id)` (spec §8 scenario 1): every primitive
/// action's result, truncated per spec §4.E step 3/§8, keyed by action id.
/// Compound planning nodes never appear here.
pub fn get_action_results(store: &StoreHandle, goal_id: &GoalId) -> Result<Value, ToolError> {
    let actions = action_store::list_primitive_results(store, goal_id)?;
    let mut results = serde_json::Map::new();
    for action in &actions {
        let result = action.result.as_deref().unwrap_or("");
        results.insert(
            action.id.to_string(),
            json!({
                "status": action.status.to_string(),
                "result": scaffold_core::truncate_result(result),
            }),
        );
    }
    Ok(json!({ "goal_id": goal_id.to_string(), "results": Value::Object(results) }))
}

/// Convenience for adapters that already hold an [`ActionId`] and need a
/// not-found error in the same shape as the rest of this surface.
pub fn action_not_found(id: &ActionId) -> ToolError {
    ToolError::ActionNotFound(id.to_string())
}

#[cfg(test)]
#[path = "ops_tests.rs"]
mod tests;
