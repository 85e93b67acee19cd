//! Person entity and its `people` document schema.
//!
//! # Invariants
//! - `tickets` are plain ticket numbers, not references to ticket documents.
//! - `project` is a denormalized project name.

use super::id::ObjectId;
use super::{decode_fields, require_text, DecodeError, Document, Entity, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection name for person documents.
pub const PEOPLE_COLLECTION: &str = "people";

// Top-level field names of the stored document.
pub(crate) const NAME_FIELD: &str = "name";
pub(crate) const AGE_FIELD: &str = "age";
pub(crate) const TICKETS_FIELD: &str = "tickets";
pub(crate) const PROJECT_FIELD: &str = "project";

/// Person as exchanged with callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Store-assigned id in 24-hex wire form. Empty before creation.
    pub id: String,
    pub name: String,
    pub age: i32,
    /// Ordered ticket numbers held by this person.
    pub tickets: Vec<i32>,
    pub project: String,
}

impl Person {
    /// Builds a person that has not been stored yet (empty id).
    pub fn new(
        name: impl Into<String>,
        age: i32,
        tickets: Vec<i32>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            age,
            tickets,
            project: project.into(),
        }
    }
}

#[derive(Deserialize)]
struct PersonFields {
    name: String,
    age: i32,
    tickets: Vec<i32>,
    project: String,
}

impl Entity for Person {
    const COLLECTION: &'static str = PEOPLE_COLLECTION;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(NAME_FIELD, &self.name)
    }

    fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(NAME_FIELD.to_string(), Value::from(self.name.as_str()));
        document.insert(AGE_FIELD.to_string(), Value::from(self.age));
        document.insert(TICKETS_FIELD.to_string(), Value::from(self.tickets.clone()));
        document.insert(PROJECT_FIELD.to_string(), Value::from(self.project.as_str()));
        document
    }

    fn from_document(id: ObjectId, document: Document) -> Result<Self, DecodeError> {
        let fields: PersonFields = decode_fields(PEOPLE_COLLECTION, id, document)?;
        Ok(Self {
            id: id.to_hex(),
            name: fields.name,
            age: fields.age,
            tickets: fields.tickets,
            project: fields.project,
        })
    }
}
