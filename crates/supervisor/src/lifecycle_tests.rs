// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use super::*;
use scaffold_core::{Goal, GoalStatus};
use scaffold_dispatch::FakeSpawner;
use scaffold_store::goal_store;
use serial_test::serial;

fn config() -> SupervisorConfig {
    SupervisorConfig {
        supervisor_program: PathBuf::from("/usr/bin/true"),
        stale_grace: Duration::from_secs(3600),
    }
}

fn spawn_sleeper() -> std::process::Child {
    Command::new("sleep")
        .arg("5")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn sleep")
}

#[test]
fn spawn_supervisor_records_pid_and_start_time() {
    let store = StoreHandle::open_in_memory().unwrap();
    let goal = goal_store::insert(&store, Goal::builder().build(), 0).unwrap();
    let spawner = FakeSpawner::new(555);

    let pid = spawn_supervisor(&store, &spawner, &config(), &goal.id, 42).unwrap();
    assert_eq!(pid, 555);

    let fetched = goal_store::get(&store, &goal.id).unwrap().unwrap();
    assert_eq!(fetched.supervisor_pid, 555);
    assert_eq!(fetched.supervisor_started_at, 42);
}

#[test]
#[serial]
fn spawn_supervisor_rejects_when_already_live() {
    let store = StoreHandle::open_in_memory().unwrap();
    let mut child = spawn_sleeper();
    let goal = goal_store::insert(
        &store,
        Goal::builder()
            .supervisor_pid(child.id() as i64)
            .supervisor_started_at(0)
            .build(),
        0,
    )
    .unwrap();
    let spawner = FakeSpawner::new(1);

    let err = spawn_supervisor(&store, &spawner, &config(), &goal.id, 1).unwrap_err();
    assert!(matches!(err, SupervisorError::AlreadyRunning));

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn spawn_supervisor_rejects_missing_goal() {
    let store = StoreHandle::open_in_memory().unwrap();
    let spawner = FakeSpawner::new(1);
    let err = spawn_supervisor(&store, &spawner, &config(), &scaffold_core::GoalId::new(), 0)
        .unwrap_err();
    assert!(matches!(err, SupervisorError::GoalNotFound(_)));
}

#[test]
#[serial]
fn supervisor_alive_true_for_live_pid_false_and_cleared_after_exit() {
    let store = StoreHandle::open_in_memory().unwrap();
    let mut child = spawn_sleeper();
    let goal = goal_store::insert(
        &store,
        Goal::builder()
            .supervisor_pid(child.id() as i64)
            .supervisor_started_at(0)
            .build(),
        0,
    )
    .unwrap();

    assert!(supervisor_alive(&store, &goal.id, 1).unwrap());

    let _ = child.kill();
    let _ = child.wait();

    assert!(!supervisor_alive(&store, &goal.id, 2).unwrap());
    let fetched = goal_store::get(&store, &goal.id).unwrap().unwrap();
    assert_eq!(fetched.supervisor_pid, 0);
}

#[test]
fn supervisor_alive_false_when_no_pid_recorded() {
    let store = StoreHandle::open_in_memory().unwrap();
    let goal = goal_store::insert(&store, Goal::builder().build(), 0).unwrap();
    assert!(!supervisor_alive(&store, &goal.id, 0).unwrap());
}

#[test]
#[serial]
fn reap_supervisors_clears_exited_children() {
    let store = StoreHandle::open_in_memory().unwrap();
    let mut child = Command::new("sh").arg("-c").arg("exit 0").spawn().unwrap();
    let pid = child.id() as i64;
    std::thread::sleep(Duration::from_millis(50));

    let goal = goal_store::insert(
        &store,
        Goal::builder()
            .status(GoalStatus::Active)
            .supervisor_pid(pid)
            .supervisor_started_at(0)
            .build(),
        0,
    )
    .unwrap();

    let reaped = reap_supervisors(&store, 10).unwrap();
    assert_eq!(reaped, 1);
    let fetched = goal_store::get(&store, &goal.id).unwrap().unwrap();
    assert_eq!(fetched.supervisor_pid, 0);

    let _ = child.wait();
}

#[test]
#[serial]
fn check_stale_clears_dead_pid() {
    let store = StoreHandle::open_in_memory().unwrap();
    let mut child = spawn_sleeper();
    let pid = child.id() as i64;
    let _ = child.kill();
    let _ = child.wait();

    let goal = goal_store::insert(
        &store,
        Goal::builder()
            .supervisor_pid(pid)
            .supervisor_started_at(0)
            .build(),
        0,
    )
    .unwrap();

    let cleared = check_stale(&store, &config(), 100).unwrap();
    assert_eq!(cleared, 1);
    let fetched = goal_store::get(&store, &goal.id).unwrap().unwrap();
    assert_eq!(fetched.supervisor_pid, 0);
}

#[test]
#[serial]
fn check_stale_leaves_fresh_live_descendant_alone() {
    let store = StoreHandle::open_in_memory().unwrap();
    let mut child = spawn_sleeper();
    let goal = goal_store::insert(
        &store,
        Goal::builder()
            .supervisor_pid(child.id() as i64)
            .supervisor_started_at(0)
            .build(),
        1,
    )
    .unwrap();

    let cleared = check_stale(&store, &config(), 1).unwrap();
    assert_eq!(cleared, 0);
    let fetched = goal_store::get(&store, &goal.id).unwrap().unwrap();
    assert_eq!(fetched.supervisor_pid, child.id() as i64);

    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn check_stale_clears_stale_non_descendant_pid() {
    let store = StoreHandle::open_in_memory().unwrap();
    // PID 1 (init) always exists and is never a descendant of the test
    // process; a zero grace window makes any recorded age "stale".
    let goal = goal_store::insert(
        &store,
        Goal::builder().supervisor_pid(1).supervisor_started_at(0).build(),
        0,
    )
    .unwrap();
    let mut cfg = config();
    cfg.stale_grace = Duration::from_millis(0);

    let cleared = check_stale(&store, &cfg, 100_000).unwrap();
    assert_eq!(cleared, 1);
    let fetched = goal_store::get(&store, &goal.id).unwrap().unwrap();
    assert_eq!(fetched.supervisor_pid, 0);
}

#[test]
fn kill_supervisor_rejects_when_not_running() {
    let store = StoreHandle::open_in_memory().unwrap();
    let goal = goal_store::insert(&store, Goal::builder().build(), 0).unwrap();
    let err = kill_supervisor(&store, &goal.id, 0).unwrap_err();
    assert!(matches!(err, SupervisorError::NotRunning));
}

#[test]
#[serial]
fn kill_supervisor_terminates_clears_pid_and_pauses_goal() {
    let store = StoreHandle::open_in_memory().unwrap();
    let mut child = spawn_sleeper();
    let goal = goal_store::insert(
        &store,
        Goal::builder()
            .status(GoalStatus::Active)
            .supervisor_pid(child.id() as i64)
            .supervisor_started_at(0)
            .build(),
        0,
    )
    .unwrap();

    kill_supervisor(&store, &goal.id, 5).unwrap();

    let fetched = goal_store::get(&store, &goal.id).unwrap().unwrap();
    assert_eq!(fetched.supervisor_pid, 0);
    assert_eq!(fetched.status, GoalStatus::Paused);
    assert!(!is_alive(child.id() as i64) || matches!(child.try_wait(), Ok(Some(_))));

    let _ = child.wait();
}

#[test]
fn respawn_dead_spawns_for_active_goals_without_supervisor() {
    let store = StoreHandle::open_in_memory().unwrap();
    goal_store::insert(&store, Goal::builder().status(GoalStatus::Active).build(), 0).unwrap();
    goal_store::insert(&store, Goal::builder().status(GoalStatus::Planning).build(), 0).unwrap();
    let spawner = FakeSpawner::new(900);

    let respawned = respawn_dead(&store, &spawner, &config(), 10).unwrap();
    assert_eq!(respawned, 1);
    assert_eq!(spawner.calls.lock().len(), 1);
}
