// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS-level liveness probes and signal delivery (spec §4.F, §5).

use std::thread;
use std::time::Duration;

use nix::sys::signal::{self, Signal};
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

/// Sends signal 0 to `pid`. Returns `true` if the process exists (and we
/// have permission to signal it), `false` on `ESRCH`. Any other errno
/// (e.g. `EPERM`) is treated as "alive" — we know it exists, we just
/// can't signal it.
pub fn is_alive(pid: i64) -> bool {
    match signal::kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        Err(nix::errno::Errno::ESRCH) => false,
        Err(_) => true,
    }
}

/// Non-blocking wait on `pid`. Returns `true` if the child was reaped
/// (exited or was signalled), `false` if it is still running or is not
/// our child (`ECHILD`).
pub fn try_reap(pid: i64) -> bool {
    match wait::waitpid(Pid::from_raw(pid as i32), Some(WaitPidFlag::WNOHANG)) {
        Ok(WaitStatus::StillAlive) => false,
        Ok(_) => true,
        Err(nix::errno::Errno::ECHILD) => false,
        Err(_) => false,
    }
}

/// Bounded-time cancellation (spec §5): SIGTERM, wait `grace`, SIGKILL if
/// still alive. Returns once the process is confirmed dead or after the
/// SIGKILL has been sent regardless of final wait status.
pub fn kill_with_grace(pid: i64, grace: Duration) {
    let nix_pid = Pid::from_raw(pid as i32);
    let _ = signal::kill(nix_pid, Signal::SIGTERM);
    thread::sleep(grace);
    if is_alive(pid) {
        let _ = signal::kill(nix_pid, Signal::SIGKILL);
    }
}

#[cfg(test)]
#[path = "liveness_tests.rs"]
mod tests;
