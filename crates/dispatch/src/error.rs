// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch-layer errors (spec §7).

use scaffold_core::{Classify, ErrorKind};
use scaffold_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("action not found: {0}")]
    ActionNotFound(String),

    #[error("goal not found: {0}")]
    GoalNotFound(String),

    #[error("action is compound; decompose first")]
    ActionIsCompound,

    #[error("action is not pending")]
    ActionNotPending,

    #[error("worker capacity reached for this goal")]
    CapacityReached,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("failed to spawn worker process: {0}")]
    SpawnFailure(String),

    #[error("failed to write prompt file: {0}")]
    PromptIoFailure(String),
}

impl Classify for DispatchError {
    fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::ActionNotFound(_) | DispatchError::GoalNotFound(_) => ErrorKind::NotFound,
            DispatchError::ActionIsCompound | DispatchError::ActionNotPending => {
                ErrorKind::PreconditionViolated
            }
            DispatchError::CapacityReached => ErrorKind::CapacityReached,
            DispatchError::Store(_) | DispatchError::PromptIoFailure(_) => ErrorKind::StoreFailure,
            DispatchError::SpawnFailure(_) => ErrorKind::SpawnFailure,
        }
    }
}
