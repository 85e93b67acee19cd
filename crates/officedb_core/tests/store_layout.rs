use officedb_core::db::layout::latest_layout_version;
use officedb_core::db::{open_db, open_db_in_memory, CallScope, DbError, StoreHandle};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_layout() {
    let store = open_db_in_memory().unwrap();

    assert_eq!(layout_version(&store), latest_layout_version());
    assert_table_exists(&store, "documents");
}

#[test]
fn opening_same_store_twice_is_idempotent_and_keeps_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("officedb.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .run(&CallScope::unbounded(), |conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES ('people', zeroblob(12), '{}');",
                [],
            )
        })
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(layout_version(&second), latest_layout_version());
    let count: i64 = second
        .run(&CallScope::unbounded(), |conn| {
            conn.query_row("SELECT COUNT(*) FROM documents;", [], |row| row.get(0))
        })
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_store_with_newer_layout_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_layout_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn documents_table_rejects_non_object_bodies_and_short_ids() {
    let store = open_db_in_memory().unwrap();

    let array_body = store.run(&CallScope::unbounded(), |conn| {
        conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES ('people', zeroblob(12), '[1, 2]');",
            [],
        )
    });
    assert!(matches!(array_body, Err(DbError::Sqlite(_))));

    let short_id = store.run(&CallScope::unbounded(), |conn| {
        conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES ('people', zeroblob(4), '{}');",
            [],
        )
    });
    assert!(matches!(short_id, Err(DbError::Sqlite(_))));
}

fn layout_version(store: &StoreHandle) -> u32 {
    store
        .run(&CallScope::unbounded(), |conn| {
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        })
        .unwrap()
}

fn assert_table_exists(store: &StoreHandle, table_name: &str) {
    let exists: i64 = store
        .run(&CallScope::unbounded(), |conn| {
            conn.query_row(
                "SELECT EXISTS(
                    SELECT 1
                    FROM sqlite_master
                    WHERE type = 'table' AND name = ?1
                );",
                [table_name],
                |row| row.get(0),
            )
        })
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
