// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Per-goal supervisor process lifecycle (spec §4.F).

pub mod error;
pub mod lifecycle;
pub mod liveness;

pub use error::SupervisorError;
pub use lifecycle::{
    check_stale, kill_supervisor, reap_supervisors, respawn_dead, spawn_supervisor,
    supervisor_alive, SupervisorConfig,
};
pub use liveness::{is_alive, kill_with_grace, try_reap};
