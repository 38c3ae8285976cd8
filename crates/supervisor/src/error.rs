// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervisor-lifecycle errors (spec §7).

use scaffold_core::{Classify, ErrorKind};
use scaffold_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("goal not found: {0}")]
    GoalNotFound(String),

    #[error("supervisor already running for this goal")]
    AlreadyRunning,

    #[error("no supervisor is running for this goal")]
    NotRunning,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to spawn supervisor process: {0}")]
    SpawnFailure(String),
}

impl Classify for SupervisorError {
    fn kind(&self) -> ErrorKind {
        match self {
            SupervisorError::GoalNotFound(_) => ErrorKind::NotFound,
            SupervisorError::AlreadyRunning => ErrorKind::PreconditionViolated,
            SupervisorError::NotRunning => ErrorKind::PreconditionViolated,
            SupervisorError::Store(_) => ErrorKind::StoreFailure,
            SupervisorError::SpawnFailure(_) => ErrorKind::SpawnFailure,
        }
    }
}
