// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kind classification shared across every layer (spec §7).
//!
//! Individual crates define their own `thiserror`-derived error enums for
//! their own failure modes; each of those enums implements
//! [`Classify`] so the orchestrator tool surface can build the §6.2 JSON
//! envelope without re-deriving the taxonomy at each call site.

use serde::{Deserialize, Serialize};

/// The seven error kinds of spec §7. Not a type name for any one crate's
/// error enum — a tag every such enum maps itself onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing required parameter, malformed JSON, invalid status keyword,
    /// invalid role characters.
    InputInvalid,
    /// goal_id, action_id, queue, or work_item_id does not exist.
    NotFound,
    /// Action is compound and dispatch was requested; action not Pending;
    /// goal in the wrong status for the requested transition; supervisor
    /// already running.
    PreconditionViolated,
    /// Worker count is at or above the configured maximum for the goal.
    CapacityReached,
    /// prepare/bind/step/commit error from the durable layer, or I/O
    /// failure writing the prompt temp file.
    StoreFailure,
    /// fork/exec failed.
    SpawnFailure,
    /// signal-0 returned ESRCH, or the kill cycle completed only after
    /// SIGKILL. Internal bookkeeping, not normally surfaced to callers.
    ProcessLifecycle,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InputInvalid => "input_invalid",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PreconditionViolated => "precondition_violated",
            ErrorKind::CapacityReached => "capacity_reached",
            ErrorKind::StoreFailure => "store_failure",
            ErrorKind::SpawnFailure => "spawn_failure",
            ErrorKind::ProcessLifecycle => "process_lifecycle",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every crate's error enum so callers can classify a
/// failure without matching on crate-specific variants.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}
