// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store-layer error type (spec §7 "Store-failure").

use scaffold_core::{Classify, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("nested transaction not supported")]
    NestedTransaction,

    #[error("commit called with no transaction open")]
    NoTransaction,

    #[error("rollback called with no transaction open")]
    NoRollback,
}

impl Classify for StoreError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::StoreFailure
    }
}
