use crate::model::Error;
#[cfg(test)]
use crate::model::StoredExchangeRate;
use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{ffi::ErrorCode, params, Connection, InterruptHandle};
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

#[derive(Clone)]
pub struct ExchangeRateRepository {
    pool: Pool<SqliteConnectionManager>,
}

/// Aborts an insert from another thread, whether it is still queued or already running.
#[derive(Clone, Default)]
pub struct Cancel(Arc<Mutex<CancelState>>);

#[derive(Default)]
struct CancelState {
    cancelled: bool,
    handle: Option<InterruptHandle>,
}

impl Cancel {
    pub fn cancel(&self) {
        let mut state = self.lock();
        state.cancelled = true;
        if let Some(handle) = &state.handle {
            handle.interrupt();
        }
    }

    fn arm(&self, conn: &Connection) -> bool {
        let mut state = self.lock();
        if state.cancelled {
            return false;
        }
        state.handle = Some(conn.get_interrupt_handle());
        true
    }

    // Must run before the connection goes back to the pool.
    fn disarm(&self) {
        self.lock().handle = None;
    }

    fn lock(&self) -> MutexGuard<'_, CancelState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ExchangeRateRepository {
    pub fn new(pool: &Pool<SqliteConnectionManager>) -> ExchangeRateRepository {
        ExchangeRateRepository { pool: pool.clone() }
    }

    /// Inserts one row. Waiting for a pooled connection and for SQLite locks is each
    /// capped at `deadline`, and `cancel` interrupts the statement.
    pub fn insert(
        &self,
        bid: &str,
        created_at: DateTime<Utc>,
        deadline: Duration,
        cancel: &Cancel,
    ) -> Result<i64, Error> {
        let conn = self
            .pool
            .get_timeout(deadline)
            .map_err(|_| Error::timeout("storage insert", deadline))?;
        conn.busy_timeout(deadline)?;

        if !cancel.arm(&conn) {
            return Err(Error::timeout("storage insert", deadline));
        }

        let res = conn.execute(
            "INSERT INTO exchange_rate (bid, created_at) VALUES (?, ?)",
            params![bid, created_at],
        );
        cancel.disarm();
        res.map_err(|e| deadline_error(e, deadline))?;

        Ok(conn.last_insert_rowid())
    }

    #[cfg(test)]
    pub fn select_all(&self) -> Result<Vec<StoredExchangeRate>, Error> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT id, bid, created_at FROM exchange_rate ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StoredExchangeRate {
                    id: row.get(0)?,
                    bid: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

// Lock waits run out at the deadline and cancellation interrupts the statement.
fn deadline_error(e: rusqlite::Error, deadline: Duration) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: ErrorCode::DatabaseBusy | ErrorCode::OperationInterrupted,
                ..
            },
            _,
        ) => Error::timeout("storage insert", deadline),
        _ => e.into(),
    }
}
