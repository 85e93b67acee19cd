//! Shared store handle and per-call scopes.

use super::{DbError, DbResult};
use log::warn;
use rusqlite::{Connection, ErrorCode};
use std::sync::atomic::{AtomicBool, Ordering};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::{Duration, Instant};

// SQLite VM instructions between scope checks while a statement runs.
const PROGRESS_CHECK_STEPS: i32 = 1_000;
// Longest single wait for the connection before the scope is re-checked.
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Deadline and cancellation bounds for a single store call.
///
/// The default scope is unbounded.
#[derive(Debug, Clone, Default)]
pub struct CallScope {
    deadline: Option<Instant>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl CallScope {
    /// Scope without deadline or cancellation.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Scope ending at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Scope ending `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Scope that ends as soon as `flag` is set to `true`.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn is_bounded(&self) -> bool {
        self.deadline.is_some() || self.cancelled.is_some()
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Cancellation wins over an expired deadline.
    fn ensure_open(&self) -> DbResult<()> {
        if self.is_cancelled() {
            return Err(DbError::Cancelled);
        }
        if self.is_expired() {
            return Err(DbError::DeadlineExceeded);
        }
        Ok(())
    }
}

/// Cloneable handle to the one shared store connection.
///
/// Clones share the same connection; every call holds it exclusively for the
/// duration of one statement batch.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    conn: Arc<Mutex<Connection>>,
}

impl StoreHandle {
    pub(crate) fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against the connection within `scope`.
    ///
    /// # Errors
    /// - `DeadlineExceeded` / `Cancelled` when the scope ends while waiting
    ///   for the connection or while `op` runs; `op` is not started once the
    ///   scope has ended.
    /// - `Sqlite` for any other store failure.
    pub fn run<T>(
        &self,
        scope: &CallScope,
        op: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> DbResult<T> {
        let conn = self.acquire(scope)?;
        scope.ensure_open()?;

        if scope.is_bounded() {
            let watched = scope.clone();
            conn.progress_handler(
                PROGRESS_CHECK_STEPS,
                Some(move || watched.is_cancelled() || watched.is_expired()),
            );
        }
        let result = op(&conn);
        if scope.is_bounded() {
            conn.progress_handler(PROGRESS_CHECK_STEPS, None::<fn() -> bool>);
        }

        result.map_err(|err| match err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::OperationInterrupted =>
            {
                warn!("event=store_call module=db status=interrupted");
                if scope.is_cancelled() {
                    DbError::Cancelled
                } else {
                    DbError::DeadlineExceeded
                }
            }
            other => DbError::Sqlite(other),
        })
    }

    /// Waits for the connection no longer than `scope` allows.
    fn acquire(&self, scope: &CallScope) -> DbResult<MutexGuard<'_, Connection>> {
        if !scope.is_bounded() {
            return Ok(self.conn.lock());
        }
        loop {
            scope.ensure_open()?;
            let wait = scope.deadline.map_or(LOCK_POLL_INTERVAL, |deadline| {
                deadline
                    .saturating_duration_since(Instant::now())
                    .min(LOCK_POLL_INTERVAL)
            });
            if let Some(conn) = self.conn.try_lock_for(wait) {
                return Ok(conn);
            }
        }
    }
}
