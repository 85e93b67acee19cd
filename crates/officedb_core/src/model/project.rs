//! Project entity and its `projects` document schema.
//!
//! # Invariants
//! - `collaborators` are person names; their order carries no meaning.
//! - `difficulty` is free text, stored verbatim.

use super::id::ObjectId;
use super::{decode_fields, require_text, DecodeError, Document, Entity, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection name for project documents.
pub const PROJECTS_COLLECTION: &str = "projects";

// Top-level field names of the stored document.
pub(crate) const NAME_FIELD: &str = "name";
pub(crate) const COLLABORATORS_FIELD: &str = "collaborators";
pub(crate) const DIFFICULTY_FIELD: &str = "difficulty";

/// Project as exchanged with callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned id in 24-hex wire form. Empty before creation.
    pub id: String,
    pub name: String,
    pub collaborators: Vec<String>,
    /// Difficulty level label, e.g. `alta`, `media`.
    pub difficulty: String,
}

impl Project {
    /// Builds a project that has not been stored yet (empty id).
    pub fn new(
        name: impl Into<String>,
        collaborators: Vec<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            collaborators,
            difficulty: difficulty.into(),
        }
    }
}

#[derive(Deserialize)]
struct ProjectFields {
    name: String,
    collaborators: Vec<String>,
    difficulty: String,
}

impl Entity for Project {
    const COLLECTION: &'static str = PROJECTS_COLLECTION;

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(NAME_FIELD, &self.name)
    }

    fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(NAME_FIELD.to_string(), Value::from(self.name.as_str()));
        document.insert(
            COLLABORATORS_FIELD.to_string(),
            Value::from(self.collaborators.clone()),
        );
        document.insert(
            DIFFICULTY_FIELD.to_string(),
            Value::from(self.difficulty.as_str()),
        );
        document
    }

    fn from_document(id: ObjectId, document: Document) -> Result<Self, DecodeError> {
        let fields: ProjectFields = decode_fields(PROJECTS_COLLECTION, id, document)?;
        Ok(Self {
            id: id.to_hex(),
            name: fields.name,
            collaborators: fields.collaborators,
            difficulty: fields.difficulty,
        })
    }
}
