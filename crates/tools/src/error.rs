// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors for the orchestrator tool surface (spec §4.G, §7).

use scaffold_core::{Classify, ErrorKind};
use scaffold_store::StoreError;
use scaffold_supervisor::SupervisorError;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("goal not found: {0}")]
    GoalNotFound(String),

    #[error("action not found: {0}")]
    ActionNotFound(String),

    #[error("goal is in a terminal state")]
    TerminalState,

    #[error("goal status does not permit this transition")]
    InvalidTransition,

    #[error("supervisor already running for this goal")]
    AlreadyRunning,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("supervisor error: {0}")]
    Supervisor(#[from] SupervisorError),
}

impl Classify for ToolError {
    fn kind(&self) -> ErrorKind {
        match self {
            ToolError::GoalNotFound(_) => ErrorKind::NotFound,
            ToolError::ActionNotFound(_) => ErrorKind::NotFound,
            ToolError::TerminalState => ErrorKind::PreconditionViolated,
            ToolError::InvalidTransition => ErrorKind::PreconditionViolated,
            ToolError::AlreadyRunning => ErrorKind::PreconditionViolated,
            ToolError::Store(e) => e.kind(),
            ToolError::Supervisor(e) => e.kind(),
        }
    }
}
