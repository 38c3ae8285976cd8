// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Worker dispatch (spec §4.E) and role-prompt resolution (spec §6.3).

pub mod context;
pub mod dispatch;
pub mod error;
pub mod role;
pub mod spawn;

pub use context::{build_work_context, prerequisite_results};
pub use dispatch::{goap_dispatch_action, DispatchConfig, DispatchOutcome};
pub use error::DispatchError;
pub use role::{builtin_prompt, resolve_prompt};
pub use spawn::{supervisor_argv, worker_argv, ProcessSpawner, Spawner};
#[cfg(any(test, feature = "test-support"))]
pub use spawn::FakeSpawner;
