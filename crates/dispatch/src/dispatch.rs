// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `goap_dispatch_action` (spec §4.E) — the worker dispatcher.

use std::path::PathBuf;

use scaffold_core::{ActionId, ActionStatus};
use scaffold_store::{action_store, goal_store, work_queue, StoreHandle};

use crate::context::build_work_context;
use crate::error::DispatchError;
use crate::role;
use crate::spawn::{worker_argv, Spawner};

/// Tunables for the dispatcher (spec §11).
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub max_workers_per_goal: u32,
    pub worker_program: PathBuf,
    pub app_home: PathBuf,
}

/// Successful dispatch result (spec §4.E step 7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub action_id: ActionId,
    pub worker_pid: u32,
    pub work_item_id: String,
}

/// Dispatches `action_id` to a worker process.
///
/// Invariants: an action transitions to Running only after the work item
/// is enqueued and the worker process is spawned; action cleanup on any
/// failure leaves the action Pending and removes the queued item.
pub fn goap_dispatch_action(
    store: &StoreHandle,
    spawner: &dyn Spawner,
    config: &DispatchConfig,
    action_id: &ActionId,
    now_ms: i64,
) -> Result<DispatchOutcome, DispatchError> {
    let action = action_store::get(store, action_id)?
        .ok_or_else(|| DispatchError::ActionNotFound(action_id.to_string()))?;

    if action.is_compound {
        return Err(DispatchError::ActionIsCompound);
    }
    if action.status != ActionStatus::Pending {
        return Err(DispatchError::ActionNotPending);
    }

    let goal = goal_store::get(store, &action.goal_id)?
        .ok_or_else(|| DispatchError::GoalNotFound(action.goal_id.to_string()))?;

    let running = action_store::count_by_status(store, &action.goal_id, ActionStatus::Running)?;
    if running as u32 >= config.max_workers_per_goal {
        return Err(DispatchError::CapacityReached);
    }

    let completed = action_store::list_completed(store, &action.goal_id)?;
    let goal_description = if goal.description.is_empty() {
        goal.name.as_str()
    } else {
        goal.description.as_str()
    };
    let context = build_work_context(goal_description, &action, &goal.world_state, &completed);

    let item = work_queue::enqueue(
        store,
        &goal.queue_name,
        &action.description,
        &context,
        3,
        now_ms,
    )?;

    let prompt_text = role::resolve_prompt(&config.app_home, &action.role);
    let prompt_file = if prompt_text.trim().is_empty() {
        None
    } else {
        match write_prompt_file(&config.app_home, &item.id.to_string(), &prompt_text) {
            Ok(path) => Some(path),
            Err(e) => {
                let _ = work_queue::remove(store, &item.id);
                return Err(DispatchError::PromptIoFailure(e.to_string()));
            }
        }
    };

    let args = worker_argv(&goal.queue_name, prompt_file.as_deref());
    let spawn_result = spawner.spawn(&config.worker_program, &args);

    let worker_pid = match spawn_result {
        Ok(pid) => pid,
        Err(e) => {
            let _ = work_queue::remove(store, &item.id);
            if let Some(path) = &prompt_file {
                let _ = std::fs::remove_file(path);
            }
            return Err(DispatchError::SpawnFailure(e.to_string()));
        }
    };

    action_store::update_status(store, action_id, ActionStatus::Running, now_ms)?;
    action_store::set_work_item_id(store, action_id, item.id.as_str(), now_ms)?;

    Ok(DispatchOutcome {
        action_id: *action_id,
        worker_pid,
        work_item_id: item.id.to_string(),
    })
}

fn write_prompt_file(
    app_home: &std::path::Path,
    work_item_id: &str,
    text: &str,
) -> std::io::Result<PathBuf> {
    let dir = app_home.join("tmp");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("prompt-{work_item_id}.md"));
    std::fs::write(&path, text)?;
    Ok(path)
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
