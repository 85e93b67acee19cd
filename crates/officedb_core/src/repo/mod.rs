//! Repository layer over the embedded document store.
//!
//! # Responsibility
//! - Provide collection-scoped document CRUD contracts.
//! - Keep SQL and JSON-body handling inside the persistence boundary.
//!
//! # Invariants
//! - Mutations address exactly one document by store id.
//! - Lookups that find nothing return `RepoError::NotFound`, never an empty
//!   placeholder document.
//! - Read paths reject unreadable persisted bodies instead of masking them.

pub mod document_repo;
