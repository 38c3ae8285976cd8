// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors for the `scaffold` binary itself (config/logging/process-loop
//! glue). Errors from the library crates pass through their own types.

use scaffold_dispatch::DispatchError;
use scaffold_store::StoreError;
use scaffold_supervisor::SupervisorError;
use scaffold_tools::ToolError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("could not resolve a state directory: set SCAFFOLD_HOME or HOME")]
    NoStateDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Supervisor(#[from] SupervisorError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("goal not found: {0}")]
    GoalNotFound(String),

    #[error("invalid goal id: {0}")]
    InvalidGoalId(String),
}
