//! Wire entities and their canonical persisted document shapes.
//!
//! # Responsibility
//! - Define the strongly-typed entities exchanged with callers.
//! - Map each entity to exactly one document schema and back.
//!
//! # Invariants
//! - Documents never carry the id; it lives in the store key column.
//! - Decoding is strict: missing or mistyped declared fields fail, unknown
//!   extra fields are ignored.
//! - A failed decode never yields a partially populated entity.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod id;
pub mod person;
pub mod project;
pub mod ticket;

use id::ObjectId;

/// Loosely-typed document body as stored in a collection.
pub type Document = Map<String, Value>;

/// Stored document failed the entity schema contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Collection the document was read from.
    pub collection: &'static str,
    /// Store id of the offending document.
    pub id: ObjectId,
    /// Human-readable schema violation.
    pub message: String,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "document {} in `{}` does not match schema: {}",
            self.id, self.collection, self.message
        )
    }
}

impl Error for DecodeError {}

/// Entity field values rejected before any store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A structurally required text field is empty or whitespace.
    BlankField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty or whitespace-only values for required text fields.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

/// Mapping contract between a wire entity and its document schema.
pub trait Entity: Sized {
    /// Collection holding documents of this entity type.
    const COLLECTION: &'static str;

    /// Checks caller-supplied fields before create/update.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Builds the persisted document; the id is never included.
    fn to_document(&self) -> Document;

    /// Rebuilds the entity from a stored document and its store id.
    fn from_document(id: ObjectId, document: Document) -> Result<Self, DecodeError>;

    /// Builds the `$set` patch for an update request.
    ///
    /// Every updatable field is listed verbatim; callers resend unchanged
    /// values.
    fn to_update_document(&self) -> Document {
        self.to_document()
    }
}

/// Strictly decodes `document` into the schema struct `T`.
pub(crate) fn decode_fields<T: DeserializeOwned>(
    collection: &'static str,
    id: ObjectId,
    document: Document,
) -> Result<T, DecodeError> {
    serde_json::from_value(Value::Object(document)).map_err(|err| DecodeError {
        collection,
        id,
        message: err.to_string(),
    })
}
