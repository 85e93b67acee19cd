//! Embedded document store: bootstrap, shared handle and call scopes.
//!
//! # Responsibility
//! - Open and configure the SQLite database backing the document store.
//! - Apply the store layout before any document is read or written.
//! - Serialize access to the single shared connection and enforce per-call
//!   deadlines and cancellation.
//!
//! # Invariants
//! - Layout version is tracked via `PRAGMA user_version`.
//! - A call whose scope has ended never starts a statement.
//! - A statement interrupted by its scope reports `DeadlineExceeded` or
//!   `Cancelled`, never a generic store failure.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod handle;
pub mod layout;
mod open;

pub use handle::{CallScope, StoreHandle};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The call deadline passed before the store round trip completed.
    DeadlineExceeded,
    /// The caller cancelled the call before the store round trip completed.
    Cancelled,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store layout version {db_version} is newer than supported {latest_supported}"
            ),
            Self::DeadlineExceeded => write!(f, "deadline exceeded before store call completed"),
            Self::Cancelled => write!(f, "store call cancelled by caller"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::DeadlineExceeded | Self::Cancelled => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
