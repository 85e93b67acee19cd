//! Store layout registry and bootstrap executor.
//!
//! # Responsibility
//! - Register store-level DDL steps (the `documents` table) in order.
//! - Bring a freshly opened store up to the layout this binary expects.
//!
//! # Invariants
//! - Step versions are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - Document bodies are never rewritten here; they stay schemaless.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

struct LayoutStep {
    version: u32,
    ddl: &'static str,
}

const LAYOUT_STEPS: &[LayoutStep] = &[LayoutStep {
    version: 1,
    ddl: include_str!("0001_documents.sql"),
}];

/// Returns the newest store layout version known by this binary.
pub fn latest_layout_version() -> u32 {
    LAYOUT_STEPS.last().map_or(0, |step| step.version)
}

/// Applies every layout step newer than the store's recorded version.
///
/// Stores written by a newer binary are rejected rather than downgraded.
pub fn apply_layout(conn: &mut Connection) -> DbResult<()> {
    let recorded: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_layout_version();

    if recorded > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: recorded,
            latest_supported: latest,
        });
    }

    let pending: Vec<&LayoutStep> = LAYOUT_STEPS
        .iter()
        .filter(|step| step.version > recorded)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for step in pending {
        tx.execute_batch(step.ddl)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_layout module=db status=ok from_version={} to_version={}",
            recorded, step.version
        );
    }
    tx.commit()?;

    Ok(())
}
