// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The minimal `--supervisor` arm (spec §15): assembles the in-scope
//! primitives of the data-flow diagram (`list_ready` -> `dispatch_action`
//! -> wait for queue drain -> `merge` -> `progress`) into a runnable
//! per-goal loop. Not the planning/decomposition layer — that external
//! contract is out of scope here.

use std::thread;

use scaffold_core::{ActionStatus, Clock, GoalId, GoalStatus, SystemClock};
use scaffold_dispatch::{goap_dispatch_action, DispatchError, ProcessSpawner};
use scaffold_goap::merge_world_state;
use scaffold_store::{action_store, goal_store, work_queue, StoreHandle};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::CliError;

fn now_ms() -> i64 {
    SystemClock.epoch_ms() as i64
}

/// Runs the supervisor loop for `goal_id` until the goal reaches a
/// terminal status or leaves `Active` (paused or cancelled out from under
/// it). Returns once the loop exits; does not itself fork or daemonize.
pub fn run(store: &StoreHandle, config: &Config, goal_id: &GoalId) -> Result<(), CliError> {
    let dispatch_config = config.dispatch_config();
    let spawner = ProcessSpawner;

    loop {
        let goal = goal_store::get(store, goal_id)?.ok_or_else(|| CliError::GoalNotFound(goal_id.to_string()))?;
        if goal.status != GoalStatus::Active {
            info!(goal_id = %goal_id, status = %goal.status, "supervisor loop exiting: goal left active");
            return Ok(());
        }

        reconcile_running_actions(store, goal_id)?;

        let goal = goal_store::get(store, goal_id)?.ok_or_else(|| CliError::GoalNotFound(goal_id.to_string()))?;
        let progress = scaffold_goap::progress(&goal.goal_state, &goal.world_state);
        if progress.complete {
            goal_store::update_status(store, goal_id, GoalStatus::Completed, now_ms())?;
            info!(goal_id = %goal_id, "goal completed");
            return Ok(());
        }

        dispatch_ready_actions(store, &spawner, &dispatch_config, goal_id, &goal.world_state)?;

        thread::sleep(config.supervisor_poll_interval);
    }
}

fn dispatch_ready_actions(
    store: &StoreHandle,
    spawner: &ProcessSpawner,
    dispatch_config: &scaffold_dispatch::DispatchConfig,
    goal_id: &GoalId,
    world_state: &Value,
) -> Result<(), CliError> {
    let ready = action_store::list_ready(store, goal_id, world_state)?;
    for action in ready {
        match goap_dispatch_action(store, spawner, dispatch_config, &action.id, now_ms()) {
            Ok(outcome) => {
                info!(goal_id = %goal_id, action_id = %action.id, worker_pid = outcome.worker_pid, "dispatched action");
            }
            Err(DispatchError::CapacityReached) => break,
            Err(e) => warn!(goal_id = %goal_id, action_id = %action.id, error = %e, "failed to dispatch action"),
        }
    }
    Ok(())
}

/// For every Running action with a recorded work item, checks whether the
/// queue has resolved it: Completed merges `effects` into the goal's
/// world state and marks the action Completed; Failed (attempts
/// exhausted) marks the action Failed. Assigned/Pending items are still
/// in flight and are left alone.
fn reconcile_running_actions(store: &StoreHandle, goal_id: &GoalId) -> Result<(), CliError> {
    let running = action_store::list_by_goal(store, goal_id)?
        .into_iter()
        .filter(|a| a.status == ActionStatus::Running);

    for action in running {
        let Some(item_id) = action.work_item_id.as_deref() else {
            continue;
        };
        let item_id = scaffold_core::WorkItemId::from_string(item_id);
        let Some(item) = work_queue::get(store, &item_id)? else {
            continue;
        };

        match item.status {
            scaffold_core::WorkItemStatus::Completed => {
                let result = item.result.as_deref().unwrap_or("");
                action_store::update_result(store, &action.id, ActionStatus::Completed, result, now_ms())?;
                if !action.effects.is_empty() {
                    let mut assertions = Map::new();
                    for key in &action.effects {
                        assertions.insert(key.clone(), Value::Bool(true));
                    }
                    let goal = goal_store::get(store, goal_id)?.ok_or_else(|| CliError::GoalNotFound(goal_id.to_string()))?;
                    let merged = merge_world_state(&goal.world_state, &Value::Object(assertions));
                    goal_store::update_world_state(store, goal_id, &merged, now_ms())?;
                }
                info!(goal_id = %goal_id, action_id = %action.id, "action completed");
            }
            scaffold_core::WorkItemStatus::Failed => {
                let error = item.error.as_deref().unwrap_or("work item failed");
                action_store::update_result(store, &action.id, ActionStatus::Failed, error, now_ms())?;
                warn!(goal_id = %goal_id, action_id = %action.id, "action failed");
            }
            scaffold_core::WorkItemStatus::Pending | scaffold_core::WorkItemStatus::Assigned => {}
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "supervisor_loop_tests.rs"]
mod tests;
