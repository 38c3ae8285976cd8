// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable store abstraction (spec §4.A).
//!
//! A single handle wraps an embedded SQL database file. All write paths
//! are serialized under one process-global mutex per handle; foreign keys
//! are enabled. Cross-process concurrency is delegated to SQLite's own
//! file-level locking; the in-process mutex guards only against thread
//! interleaving of the current handle.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, Params, Row};

use crate::error::StoreError;
use crate::schema;

struct Inner {
    conn: Connection,
    in_transaction: bool,
}

pub struct StoreHandle {
    inner: Mutex<Inner>,
}

impl StoreHandle {
    /// Opens (creating if absent) the database file at `path` and applies
    /// the idempotent schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        schema::apply(&conn)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                in_transaction: false,
            }),
        })
    }

    /// Opens a private in-memory database. Used by tests and by any
    /// caller that wants a throwaway store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::apply(&conn)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                in_transaction: false,
            }),
        })
    }

    /// Executes `sql` with bound parameters, returning the number of rows
    /// affected.
    pub fn exec<P: Params>(&self, sql: &str, params: P) -> Result<usize, StoreError> {
        let inner = self.inner.lock();
        Ok(inner.conn.execute(sql, params)?)
    }

    /// Runs `sql`, mapping at most one row through `mapper`.
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, mut mapper: F) -> Result<Option<T>, StoreError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let inner = self.inner.lock();
        let mut stmt = inner.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => Ok(Some(mapper(row)?)),
            None => Ok(None),
        }
    }

    /// Runs `sql`, mapping every returned row through `mapper`.
    pub fn query_list<T, P, F>(&self, sql: &str, params: P, mut mapper: F) -> Result<Vec<T>, StoreError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let inner = self.inner.lock();
        let mut stmt = inner.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(mapper(row)?);
        }
        Ok(out)
    }

    /// Returns whether `sql` (typically a `SELECT 1 ... LIMIT 1` style
    /// query) would yield at least one row.
    pub fn exists<P: Params>(&self, sql: &str, params: P) -> Result<bool, StoreError> {
        let inner = self.inner.lock();
        let mut stmt = inner.conn.prepare(sql)?;
        Ok(stmt.exists(params)?)
    }

    /// Begins an explicit transaction. Nested begins are rejected.
    pub fn begin(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.in_transaction {
            return Err(StoreError::NestedTransaction);
        }
        inner.conn.execute_batch("BEGIN")?;
        inner.in_transaction = true;
        Ok(())
    }

    pub fn commit(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if !inner.in_transaction {
            return Err(StoreError::NoTransaction);
        }
        inner.conn.execute_batch("COMMIT")?;
        inner.in_transaction = false;
        Ok(())
    }

    pub fn rollback(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if !inner.in_transaction {
            return Err(StoreError::NoRollback);
        }
        inner.conn.execute_batch("ROLLBACK")?;
        inner.in_transaction = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
