// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn worker_argv_without_prompt_file() {
    let argv = worker_argv("goal_abc", None);
    assert_eq!(argv, vec!["--worker", "--queue", "goal_abc", "--yolo"]);
}

#[test]
fn worker_argv_with_prompt_file() {
    let argv = worker_argv("goal_abc", Some(Path::new("/tmp/prompt.md")));
    assert_eq!(
        argv,
        vec!["--worker", "--queue", "goal_abc", "--yolo", "--system-prompt-file", "/tmp/prompt.md"]
    );
}

#[test]
fn supervisor_argv_shape() {
    let argv = supervisor_argv("goal-123");
    assert_eq!(argv, vec!["--supervisor", "--goal", "goal-123", "--yolo"]);
}

#[test]
fn fake_spawner_records_calls_and_increments_pid() {
    let spawner = FakeSpawner::new(1000);
    let pid1 = spawner.spawn(Path::new("/bin/true"), &["a".to_string()]).unwrap();
    let pid2 = spawner.spawn(Path::new("/bin/true"), &["b".to_string()]).unwrap();
    assert_eq!(pid1, 1000);
    assert_eq!(pid2, 1001);
    assert_eq!(spawner.calls.lock().len(), 2);
}

#[test]
fn fake_spawner_can_be_set_to_fail() {
    let spawner = FakeSpawner::new(1);
    spawner.set_fail(true);
    assert!(spawner.spawn(Path::new("/bin/true"), &[]).is_err());
}
