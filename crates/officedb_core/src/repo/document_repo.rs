//! Collection-scoped document repository and its SQLite implementation.
//!
//! # Invariants
//! - `find_all`/`find_many` results are unordered; callers must not rely on
//!   order across calls.
//! - `find_one` returns one arbitrary match when several documents match.
//! - `update` applies `$set` semantics: only top-level keys present in the
//!   patch are replaced, everything else is kept.

use crate::db::{CallScope, DbError, StoreHandle};
use crate::model::id::ObjectId;
use crate::model::Document;
use crate::query::filter::{json_path, Filter};
use log::debug;
use rusqlite::types::Value as SqlValue;
use rusqlite::params_from_iter;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No document in the collection matched the lookup or mutation target.
    NotFound(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(collection) => write!(f, "no matching document in `{collection}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Document read back from a collection together with its store id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: ObjectId,
    pub body: Document,
}

/// Collection-scoped document operations.
pub trait DocumentRepository {
    /// Name of the collection this repository reads and writes.
    fn collection(&self) -> &'static str;

    fn find_many(&self, filter: &Filter) -> RepoResult<Vec<StoredDocument>>;

    /// Returns one match, chosen by the store, or `NotFound`.
    fn find_one(&self, filter: &Filter) -> RepoResult<StoredDocument>;

    /// Stores `document` under a freshly assigned id.
    fn insert(&self, document: &Document) -> RepoResult<ObjectId>;

    /// Replaces the patch's top-level fields on document `id`.
    ///
    /// Returns `Ok(true)` when the document matched, `NotFound` otherwise.
    fn update(&self, id: ObjectId, patch: &Document) -> RepoResult<bool>;

    /// Removes document `id`. Returns `Ok(true)` or `NotFound`.
    fn delete(&self, id: ObjectId) -> RepoResult<bool>;

    fn find_all(&self) -> RepoResult<Vec<StoredDocument>> {
        self.find_many(&Filter::All)
    }

    fn find_by_id(&self, id: ObjectId) -> RepoResult<StoredDocument> {
        self.find_one(&Filter::by_id(id))
    }
}

/// SQLite-backed repository for one collection of the shared store.
#[derive(Debug, Clone)]
pub struct SqliteDocumentRepository {
    store: StoreHandle,
    collection: &'static str,
    scope: CallScope,
}

impl SqliteDocumentRepository {
    pub fn new(store: StoreHandle, collection: &'static str) -> Self {
        Self {
            store,
            collection,
            scope: CallScope::unbounded(),
        }
    }

    /// Bounds every subsequent call by `scope`.
    pub fn with_scope(mut self, scope: CallScope) -> Self {
        self.scope = scope;
        self
    }

    fn select(&self, filter: &Filter, limit: Option<u32>) -> RepoResult<Vec<StoredDocument>> {
        let predicate = filter.to_predicate();
        let mut sql = format!(
            "SELECT id, body FROM documents WHERE collection = ? AND {}",
            predicate.sql
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut bind_values = Vec::with_capacity(predicate.params.len() + 1);
        bind_values.push(SqlValue::Text(self.collection.to_string()));
        bind_values.extend(predicate.params);

        let rows: Vec<(Vec<u8>, String)> = self.store.run(&self.scope, |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(bind_values), |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?;
            let collected: rusqlite::Result<Vec<_>> = rows.collect();
            collected
        })?;

        debug!(
            "event=repo_select module=repo status=ok collection={} rows={}",
            self.collection,
            rows.len()
        );
        rows.into_iter()
            .map(|(id, body)| parse_stored(self.collection, id, &body))
            .collect()
    }
}

impl DocumentRepository for SqliteDocumentRepository {
    fn collection(&self) -> &'static str {
        self.collection
    }

    fn find_many(&self, filter: &Filter) -> RepoResult<Vec<StoredDocument>> {
        self.select(filter, None)
    }

    fn find_one(&self, filter: &Filter) -> RepoResult<StoredDocument> {
        self.select(filter, Some(1))?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound(self.collection))
    }

    fn insert(&self, document: &Document) -> RepoResult<ObjectId> {
        let body = encode_json(&Value::Object(document.clone()))?;
        let id = ObjectId::new();
        let key = id.bytes();

        self.store.run(&self.scope, |conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
                rusqlite::params![self.collection, &key[..], body],
            )
        })?;

        debug!(
            "event=repo_insert module=repo status=ok collection={} id={id}",
            self.collection
        );
        Ok(id)
    }

    fn update(&self, id: ObjectId, patch: &Document) -> RepoResult<bool> {
        let mut bind_values = Vec::with_capacity(patch.len() * 2 + 2);
        let mut body_expr = String::from("body");
        if !patch.is_empty() {
            body_expr = format!("json_set(body{})", ", ?, json(?)".repeat(patch.len()));
            for (field, value) in patch {
                bind_values.push(SqlValue::Text(json_path(field)));
                bind_values.push(SqlValue::Text(encode_json(value)?));
            }
        }
        bind_values.push(SqlValue::Text(self.collection.to_string()));
        bind_values.push(SqlValue::Blob(id.bytes().to_vec()));

        let sql = format!(
            "UPDATE documents
             SET
                body = {body_expr},
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE collection = ? AND id = ?;"
        );
        let matched = self.store.run(&self.scope, |conn| {
            conn.execute(&sql, params_from_iter(bind_values))
        })?;

        debug!(
            "event=repo_update module=repo status=ok collection={} id={id} matched={matched}",
            self.collection
        );
        if matched == 0 {
            return Err(RepoError::NotFound(self.collection));
        }
        Ok(true)
    }

    fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        let key = id.bytes();
        let removed = self.store.run(&self.scope, |conn| {
            conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
                rusqlite::params![self.collection, &key[..]],
            )
        })?;

        debug!(
            "event=repo_delete module=repo status=ok collection={} id={id} removed={removed}",
            self.collection
        );
        if removed == 0 {
            return Err(RepoError::NotFound(self.collection));
        }
        Ok(true)
    }
}

fn parse_stored(collection: &str, id: Vec<u8>, body: &str) -> RepoResult<StoredDocument> {
    let key: [u8; 12] = id.try_into().map_err(|raw: Vec<u8>| {
        RepoError::InvalidData(format!(
            "id of length {} in `{collection}` is not a 12-byte store id",
            raw.len()
        ))
    })?;
    let id = ObjectId::from_bytes(key);

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(body)) => Ok(StoredDocument { id, body }),
        Ok(other) => Err(RepoError::InvalidData(format!(
            "body of {id} in `{collection}` is not an object: {}",
            json_kind(&other)
        ))),
        Err(err) => Err(RepoError::InvalidData(format!(
            "body of {id} in `{collection}` is not valid JSON: {err}"
        ))),
    }
}

fn encode_json(value: &Value) -> RepoResult<String> {
    serde_json::to_string(value)
        .map_err(|err| RepoError::InvalidData(format!("unencodable document value: {err}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
