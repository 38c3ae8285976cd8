// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup (spec §12): installed once, here, at process entry.
//! Library crates only emit `tracing` events; they never install a
//! subscriber.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::error::CliError;

/// Sets up a non-blocking file-appending subscriber, filtered by
/// `RUST_LOG` (defaulting to `info`). The returned guard must be held for
/// the lifetime of the process — dropping it stops the background flush
/// thread.
pub fn setup_logging(config: &Config) -> Result<tracing_appender::non_blocking::WorkerGuard, CliError> {
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(CliError::NoStateDir)?,
        config.log_path.file_name().ok_or(CliError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
