// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scaffold`: the goal/action supervisor runtime binary. Wires a
//! `Config` into the store, GOAP evaluator, dispatcher, and supervisor
//! lifecycle manager, and exposes the `--supervisor`/`--worker` process
//! contract plus the orchestrator tool surface as subcommands.

mod cli;
mod config;
mod error;
mod logging;
mod supervisor_loop;
mod worker_loop;

use clap::Parser;
use scaffold_core::{Clock, GoalId, SystemClock};
use scaffold_dispatch::ProcessSpawner;
use scaffold_store::StoreHandle;
use serde_json::Value;
use tracing::info;

use cli::{Cli, Command};
use config::Config;
use error::CliError;

fn now_ms() -> i64 {
    SystemClock.epoch_ms() as i64
}

/// Parses a goal id argument, rejecting anything that isn't exactly the
/// 36-byte id shape (spec §3) rather than silently truncating it.
fn parse_goal_id(raw: &str) -> Result<GoalId, CliError> {
    if raw.len() != scaffold_core::ID_LEN {
        return Err(CliError::InvalidGoalId(raw.to_string()));
    }
    Ok(GoalId::from_string(raw))
}

fn print_envelope(result: Result<Value, impl std::fmt::Display>) {
    let envelope = match result {
        Ok(value) => scaffold_tools::success(value),
        Err(e) => scaffold_tools::failure(e),
    };
    println!("{envelope}");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let _log_guard = logging::setup_logging(&config)?;
    let store = StoreHandle::open(&config.db_path)?;

    match cli.command {
        Command::Supervisor { goal, .. } => {
            let goal_id = parse_goal_id(&goal)?;
            info!(goal_id = %goal_id, "supervisor arm starting");
            supervisor_loop::run(&store, &config, &goal_id)?;
        }
        Command::Worker { queue, .. } => {
            let worker_id = format!("worker-{}", std::process::id());
            info!(queue = %queue, worker_id = %worker_id, "worker arm starting");
            worker_loop::run(&store, &queue, &worker_id)?;
        }
        Command::ExecutePlan { plan_text } => {
            print_envelope(Ok::<_, CliError>(scaffold_tools::execute_plan(&plan_text)));
        }
        Command::ListGoals => {
            reconcile_supervisors(&store, &config);
            print_envelope(scaffold_tools::list_goals(&store, now_ms()).map_err(CliError::from));
        }
        Command::GoalStatus { goal_id } => {
            reconcile_supervisors(&store, &config);
            let result = parse_goal_id(&goal_id).and_then(|id| {
                scaffold_tools::goal_status(&store, &id, now_ms()).map_err(CliError::from)
            });
            print_envelope(result);
        }
        Command::StartGoal { goal_id } => {
            reconcile_supervisors(&store, &config);
            let spawner = ProcessSpawner;
            let supervisor_config = config.supervisor_config();
            let result = parse_goal_id(&goal_id).and_then(|id| {
                scaffold_tools::start_goal(&store, &spawner, &supervisor_config, &id, now_ms())
                    .map_err(CliError::from)
            });
            print_envelope(result);
        }
        Command::PauseGoal { goal_id } => {
            reconcile_supervisors(&store, &config);
            let result = parse_goal_id(&goal_id)
                .and_then(|id| scaffold_tools::pause_goal(&store, &id, now_ms()).map_err(CliError::from));
            print_envelope(result);
        }
        Command::CancelGoal { goal_id } => {
            reconcile_supervisors(&store, &config);
            let result = parse_goal_id(&goal_id)
                .and_then(|id| scaffold_tools::cancel_goal(&store, &id, now_ms()).map_err(CliError::from));
            print_envelope(result);
        }
        Command::GetActionResults { goal_id } => {
            let result = parse_goal_id(&goal_id).and_then(|id| {
                scaffold_tools::get_action_results(&store, &id).map_err(CliError::from)
            });
            print_envelope(result);
        }
    }

    Ok(())
}

/// Runs the startup reconciliation sweep (spec §4.F `check_stale` /
/// `respawn_dead`) before serving a tool call. Best-effort: a failure
/// here is logged, never surfaced as the tool call's own error.
fn reconcile_supervisors(store: &StoreHandle, config: &Config) {
    let supervisor_config = config.supervisor_config();
    if let Err(e) = scaffold_supervisor::check_stale(store, &supervisor_config, now_ms()) {
        tracing::warn!(error = %e, "check_stale failed");
    }
    let spawner = ProcessSpawner;
    if let Err(e) = scaffold_supervisor::respawn_dead(store, &spawner, &supervisor_config, now_ms()) {
        tracing::warn!(error = %e, "respawn_dead failed");
    }
}
