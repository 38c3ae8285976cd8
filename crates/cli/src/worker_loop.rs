// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The minimal `--worker` arm (spec §15): claims one item from its queue
//! and, since the worker-agent program itself is out of scope, reports
//! back a fixed "not implemented" failure result. Exercises the queue's
//! claim/fail contract end-to-end without fabricating an LLM adapter.

use scaffold_core::{Clock, SystemClock};
use scaffold_store::{work_queue, StoreHandle};
use tracing::{info, warn};

use crate::error::CliError;

const NOT_IMPLEMENTED_RESULT: &str = "worker execution not implemented";

/// Claims and immediately fails one item from `queue_name`. A no-op if
/// the queue is currently empty.
pub fn run(store: &StoreHandle, queue_name: &str, worker_id: &str) -> Result<(), CliError> {
    let now_ms = SystemClock.epoch_ms() as i64;
    let Some(item) = work_queue::claim(store, queue_name, worker_id, now_ms)? else {
        info!(queue = queue_name, "no work item to claim");
        return Ok(());
    };

    warn!(queue = queue_name, work_item_id = %item.id, "worker stub claimed item; reporting not-implemented failure");
    work_queue::fail(store, &item.id, NOT_IMPLEMENTED_RESULT, now_ms)?;
    Ok(())
}

#[cfg(test)]
#[path = "worker_loop_tests.rs"]
mod tests;
