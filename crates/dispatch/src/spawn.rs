// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker process spawning (spec §4.E step 6, §6.1).

use std::path::{Path, PathBuf};
use std::process::Command;

/// Abstraction over process spawning so dispatch logic is testable
/// without forking real worker processes.
pub trait Spawner {
    /// Spawns `program` with `args` and returns the child's PID on
    /// success.
    fn spawn(&self, program: &Path, args: &[String]) -> std::io::Result<u32>;
}

/// Spawns real OS processes via `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&self, program: &Path, args: &[String]) -> std::io::Result<u32> {
        let child = Command::new(program).args(args).spawn()?;
        Ok(child.id())
    }
}

/// Builds the argv for a worker process (spec §6.1):
/// `<self_exe>, --worker, --queue, <queue_name>, --yolo, [--system-prompt-file <path>]`.
pub fn worker_argv(queue_name: &str, prompt_file: Option<&Path>) -> Vec<String> {
    let mut args = vec![
        "--worker".to_string(),
        "--queue".to_string(),
        queue_name.to_string(),
        "--yolo".to_string(),
    ];
    if let Some(path) = prompt_file {
        args.push("--system-prompt-file".to_string());
        args.push(path.display().to_string());
    }
    args
}

/// Builds the argv for a per-goal supervisor process (spec §4.F, §6.1):
/// `<self_exe>, --supervisor, --goal, <id>, --yolo`.
pub fn supervisor_argv(goal_id: &str) -> Vec<String> {
    vec![
        "--supervisor".to_string(),
        "--goal".to_string(),
        goal_id.to_string(),
        "--yolo".to_string(),
    ]
}

/// In-memory fake used by tests: records every spawn attempt and returns
/// a scripted PID (or error).
#[cfg(any(test, feature = "test-support"))]
pub struct FakeSpawner {
    pub next_pid: std::sync::atomic::AtomicU32,
    pub fail: std::sync::atomic::AtomicBool,
    pub calls: parking_lot::Mutex<Vec<(PathBuf, Vec<String>)>>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeSpawner {
    pub fn new(starting_pid: u32) -> Self {
        Self {
            next_pid: std::sync::atomic::AtomicU32::new(starting_pid),
            fail: std::sync::atomic::AtomicBool::new(false),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Spawner for FakeSpawner {
    fn spawn(&self, program: &Path, args: &[String]) -> std::io::Result<u32> {
        self.calls.lock().push((program.to_path_buf(), args.to_vec()));
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(std::io::Error::other("fake spawn failure"));
        }
        Ok(self
            .next_pid
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst))
    }
}

#[cfg(test)]
#[path = "spawn_tests.rs"]
mod tests;
