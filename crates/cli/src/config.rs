// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration (spec §11): resolved filesystem paths and the
//! tunables the rest of the spec leaves as "default".

use std::path::PathBuf;
use std::time::Duration;

use crate::error::CliError;

/// Resolve the app's state directory: `SCAFFOLD_HOME` > `dirs::state_dir()`
/// > `$HOME/.local/state/scaffold`.
fn app_home() -> Result<PathBuf, CliError> {
    if let Ok(dir) = std::env::var("SCAFFOLD_HOME") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(state_dir) = dirs::state_dir() {
        return Ok(state_dir.join("scaffold"));
    }
    let home = dirs::home_dir().ok_or(CliError::NoStateDir)?;
    Ok(home.join(".local/state/scaffold"))
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

/// Every tunable a `scaffold` process needs, resolved once at startup and
/// threaded into the store, dispatcher, and supervisor lifecycle layers.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_home: PathBuf,
    pub db_path: PathBuf,
    pub prompts_dir: PathBuf,
    pub log_path: PathBuf,
    pub max_workers_per_goal: u32,
    pub default_max_attempts: u32,
    pub supervisor_stale_grace: Duration,
    pub prerequisite_result_limit: usize,
    pub worker_program: PathBuf,
    pub supervisor_poll_interval: Duration,
}

impl Config {
    /// Builds a `Config` from the environment, in the style of the
    /// teacher's `daemon::Config::load()`.
    pub fn load() -> Result<Self, CliError> {
        let app_home = app_home()?;
        let self_exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("scaffold"));

        Ok(Self {
            db_path: app_home.join("scaffold.db"),
            prompts_dir: app_home.join("prompts"),
            log_path: app_home.join("scaffold.log"),
            max_workers_per_goal: env_u32("SCAFFOLD_MAX_WORKERS_PER_GOAL", 3),
            default_max_attempts: env_u32("SCAFFOLD_DEFAULT_MAX_ATTEMPTS", 3),
            supervisor_stale_grace: env_duration_ms(
                "SCAFFOLD_STALE_GRACE_MS",
                Duration::from_secs(3600),
            ),
            prerequisite_result_limit: env_usize("SCAFFOLD_PREREQUISITE_RESULT_LIMIT", 4000),
            worker_program: self_exe.clone(),
            supervisor_poll_interval: env_duration_ms(
                "SCAFFOLD_SUPERVISOR_POLL_MS",
                Duration::from_secs(2),
            ),
            app_home,
        })
    }

    pub fn dispatch_config(&self) -> scaffold_dispatch::DispatchConfig {
        scaffold_dispatch::DispatchConfig {
            max_workers_per_goal: self.max_workers_per_goal,
            worker_program: self.worker_program.clone(),
            app_home: self.app_home.clone(),
        }
    }

    pub fn supervisor_config(&self) -> scaffold_supervisor::SupervisorConfig {
        scaffold_supervisor::SupervisorConfig {
            supervisor_program: self.worker_program.clone(),
            stale_grace: self.supervisor_stale_grace,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
