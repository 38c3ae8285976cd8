// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::process::{Command, Stdio};
use std::time::Duration;

use super::*;
use serial_test::serial;

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
#[serial]
fn is_alive_true_for_running_child() {
    let mut child = spawn_sleeper();
    assert!(is_alive(child.id() as i64));
    let _ = child.kill();
    let _ = child.wait();
}

#[test]
#[serial]
fn is_alive_false_after_reap() {
    let mut child = spawn_sleeper();
    let pid = child.id() as i64;
    let _ = child.kill();
    let _ = child.wait();
    assert!(!is_alive(pid));
}

#[test]
#[serial]
fn try_reap_false_while_running_true_after_exit() {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg("exit 0")
        .spawn()
        .expect("spawn sh");
    let pid = child.id() as i64;
    // Give the child a moment to actually exit before reaping.
    std::thread::sleep(Duration::from_millis(50));
    assert!(try_reap(pid));
    let _ = child.wait();
}

#[test]
#[serial]
fn kill_with_grace_terminates_child() {
    let mut child = spawn_sleeper();
    let pid = child.id() as i64;
    kill_with_grace(pid, Duration::from_millis(50));
    std::thread::sleep(Duration::from_millis(50));
    assert!(!is_alive(pid));
    let _ = child.wait();
}
