// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-goal supervisor lifecycle (spec §4.F): spawn, probe, reap,
//! stale-detect, kill, respawn.

use std::path::PathBuf;
use std::time::Duration;

use scaffold_core::{GoalId, GoalStatus};
use scaffold_dispatch::{supervisor_argv, Spawner};
use scaffold_store::{goal_store, StoreHandle};
use tracing::{info, warn};

use crate::error::SupervisorError;
use crate::liveness::{is_alive, kill_with_grace, try_reap};

/// Tunables for the lifecycle manager (spec §11).
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    pub supervisor_program: PathBuf,
    pub stale_grace: Duration,
}

/// Spawns a supervisor subprocess for `goal_id` and records its PID and
/// start time. Rejects if a live supervisor is already recorded.
pub fn spawn_supervisor(
    store: &StoreHandle,
    spawner: &dyn Spawner,
    config: &SupervisorConfig,
    goal_id: &GoalId,
    now_ms: i64,
) -> Result<u32, SupervisorError> {
    let goal = goal_store::get(store, goal_id)?
        .ok_or_else(|| SupervisorError::GoalNotFound(goal_id.to_string()))?;

    if goal.has_supervisor() && is_alive(goal.supervisor_pid) {
        return Err(SupervisorError::AlreadyRunning);
    }

    let args = supervisor_argv(goal_id.as_str());
    let pid = spawner
        .spawn(&config.supervisor_program, &args)
        .map_err(|e| SupervisorError::SpawnFailure(e.to_string()))?;

    goal_store::set_supervisor(store, goal_id, pid as i64, now_ms)?;
    info!(goal_id = %goal_id, pid, "spawned supervisor");
    Ok(pid)
}

/// Sends signal 0 to the goal's recorded supervisor PID. On `ESRCH` the
/// stored PID is cleared and `false` is returned.
pub fn supervisor_alive(store: &StoreHandle, goal_id: &GoalId, now_ms: i64) -> Result<bool, SupervisorError> {
    let goal = goal_store::get(store, goal_id)?
        .ok_or_else(|| SupervisorError::GoalNotFound(goal_id.to_string()))?;

    if !goal.has_supervisor() {
        return Ok(false);
    }
    if is_alive(goal.supervisor_pid) {
        return Ok(true);
    }
    goal_store::clear_supervisor(store, goal_id, now_ms)?;
    Ok(false)
}

/// For each Active goal with a recorded supervisor, performs a
/// non-blocking wait; a reaped child's PID is cleared.
pub fn reap_supervisors(store: &StoreHandle, now_ms: i64) -> Result<usize, SupervisorError> {
    let mut reaped = 0;
    for goal in goal_store::list_with_live_supervisor(store)? {
        if try_reap(goal.supervisor_pid) {
            goal_store::clear_supervisor(store, &goal.id, now_ms)?;
            reaped += 1;
        }
    }
    Ok(reaped)
}

/// On startup, for every goal with a recorded supervisor PID: clears it
/// if the process no longer exists, or if it is live but old enough
/// (older than `stale_grace`) and no longer our descendant — i.e. it
/// belongs to a previous run of this binary, not one we just forked.
pub fn check_stale(store: &StoreHandle, config: &SupervisorConfig, now_ms: i64) -> Result<usize, SupervisorError> {
    let mut cleared = 0;
    for goal in goal_store::list_with_recorded_supervisor(store)? {
        if !is_alive(goal.supervisor_pid) {
            goal_store::clear_supervisor(store, &goal.id, now_ms)?;
            cleared += 1;
            continue;
        }
        let age_ms = now_ms.saturating_sub(goal.supervisor_started_at);
        let stale_age = age_ms >= 0 && age_ms as u128 >= config.stale_grace.as_millis();
        if stale_age && !is_descendant_of_current_process(goal.supervisor_pid) {
            warn!(goal_id = %goal.id, pid = goal.supervisor_pid, "clearing orphaned supervisor pid");
            goal_store::clear_supervisor(store, &goal.id, now_ms)?;
            cleared += 1;
        }
    }
    Ok(cleared)
}

/// Sends SIGTERM, waits 100ms, sends SIGKILL if still alive; clears the
/// recorded PID and sets the goal's status to Paused. Returns
/// `NotRunning` if no supervisor is currently recorded.
pub fn kill_supervisor(store: &StoreHandle, goal_id: &GoalId, now_ms: i64) -> Result<(), SupervisorError> {
    let goal = goal_store::get(store, goal_id)?
        .ok_or_else(|| SupervisorError::GoalNotFound(goal_id.to_string()))?;

    if !goal.has_supervisor() {
        return Err(SupervisorError::NotRunning);
    }

    kill_with_grace(goal.supervisor_pid, Duration::from_millis(100));
    goal_store::clear_supervisor(store, goal_id, now_ms)?;
    goal_store::update_status(store, goal_id, GoalStatus::Paused, now_ms)?;
    Ok(())
}

/// Spawns a supervisor for every Active goal with no recorded PID.
/// Individual spawn failures are logged and skipped rather than
/// aborting the whole sweep.
pub fn respawn_dead(
    store: &StoreHandle,
    spawner: &dyn Spawner,
    config: &SupervisorConfig,
    now_ms: i64,
) -> Result<usize, SupervisorError> {
    let mut respawned = 0;
    for goal in goal_store::list_active_without_supervisor(store)? {
        match spawn_supervisor(store, spawner, config, &goal.id, now_ms) {
            Ok(_) => respawned += 1,
            Err(e) => warn!(goal_id = %goal.id, error = %e, "failed to respawn supervisor"),
        }
    }
    Ok(respawned)
}

/// Walks `/proc/<pid>/stat` parent links to decide whether `pid` is a
/// descendant of the current process. On platforms without `/proc`, or
/// if the chain can't be read, conservatively returns `true` (unproven
/// is not the same as disproven, and we'd rather skip a clear than
/// orphan a live supervisor we actually own).
#[cfg(target_os = "linux")]
fn is_descendant_of_current_process(pid: i64) -> bool {
    let root = std::process::id() as i64;
    let mut current = pid;
    for _ in 0..64 {
        if current == root {
            return true;
        }
        match parent_pid(current) {
            Some(ppid) if ppid > 1 => current = ppid,
            _ => return false,
        }
    }
    false
}

#[cfg(target_os = "linux")]
fn parent_pid(pid: i64) -> Option<i64> {
    let contents = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
    let after_comm = contents.rsplit_once(')')?.1;
    let ppid_field = after_comm.split_whitespace().nth(1)?;
    ppid_field.parse().ok()
}

#[cfg(not(target_os = "linux"))]
fn is_descendant_of_current_process(_pid: i64) -> bool {
    true
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
