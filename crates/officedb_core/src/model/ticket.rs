//! Ticket entity and its `tickets` document schema.
//!
//! Ticket numbers are not unique at this layer.

use super::id::ObjectId;
use super::{decode_fields, require_text, DecodeError, Document, Entity, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection name for ticket documents.
pub const TICKETS_COLLECTION: &str = "tickets";

// Top-level field names of the stored document.
pub(crate) const NUMBER_FIELD: &str = "number";
pub(crate) const OWNER_FIELD: &str = "owner";

/// Ticket as exchanged with callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Store-assigned id in 24-hex wire form. Empty before creation.
    pub id: String,
    pub number: i32,
    /// Owner name (denormalized, not a person id).
    pub owner: String,
}

impl Ticket {
    /// Builds a ticket that has not been stored yet (empty id).
    pub fn new(number: i32, owner: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            number,
            owner: owner.into(),
        }
    }
}

#[derive(Deserialize)]
struct TicketFields {
    number: i32,
    owner: String,
}

impl Entity for Ticket {
    const COLLECTION: &'static str = TICKETS_COLLECTION;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(OWNER_FIELD, &self.owner)
    }

    fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(NUMBER_FIELD.to_string(), Value::from(self.number));
        document.insert(OWNER_FIELD.to_string(), Value::from(self.owner.as_str()));
        document
    }

    fn from_document(id: ObjectId, document: Document) -> Result<Self, DecodeError> {
        let fields: TicketFields = decode_fields(TICKETS_COLLECTION, id, document)?;
        Ok(Self {
            id: id.to_hex(),
            number: fields.number,
            owner: fields.owner,
        })
    }
}
