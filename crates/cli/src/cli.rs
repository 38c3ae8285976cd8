// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line surface: the `--supervisor`/`--worker` process contract
//! (spec §6.1) plus a thin front end over the orchestrator tool surface
//! (spec §4.G).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scaffold", version, about = "Goal/action supervisor runtime")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Runs the per-goal control loop. Spawned by `start-goal`; not
    /// meant to be invoked directly.
    Supervisor {
        #[arg(long)]
        goal: String,
        #[arg(long)]
        yolo: bool,
    },
    /// Claims and executes one item from a queue. Spawned by the
    /// supervisor loop; not meant to be invoked directly.
    Worker {
        #[arg(long)]
        queue: String,
        #[arg(long)]
        system_prompt_file: Option<PathBuf>,
        #[arg(long)]
        yolo: bool,
    },
    /// `execute_plan(plan_text)`: returns decomposition instructions for
    /// the planning/decomposition layer (spec §4.G, out of scope here).
    ExecutePlan { plan_text: String },
    /// `list_goals()`: every goal with status, progress, and summary.
    ListGoals,
    /// `goal_status(goal_id)`: full record, action counts, action tree.
    GoalStatus { goal_id: String },
    /// `start_goal(goal_id)`: spawns the supervisor for a planned or
    /// paused goal.
    StartGoal { goal_id: String },
    /// `pause_goal(goal_id)`: kills the running supervisor, sets Paused.
    PauseGoal { goal_id: String },
    /// `cancel_goal(goal_id)`: kills the supervisor if any, sets Failed.
    CancelGoal { goal_id: String },
    /// `get_action_results(goal_id)`: every primitive action's result.
    GetActionResults { goal_id: String },
}
