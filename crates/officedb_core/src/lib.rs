//! Core entity-mapping and query layer for the office document store.
//! This crate is the single source of truth for entity schemas and store
//! access rules; outer crates only translate calls.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, CallScope, DbError, DbResult, StoreHandle};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::id::{IdError, ObjectId};
pub use model::person::Person;
pub use model::project::Project;
pub use model::ticket::Ticket;
pub use model::{DecodeError, Document, Entity, ValidationError};
pub use query::filter::{Filter, Scalar};
pub use repo::document_repo::{
    DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository, StoredDocument,
};
pub use service::entity_service::EntityService;
pub use service::person_service::PersonService;
pub use service::project_service::ProjectService;
pub use service::ticket_service::TicketService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
