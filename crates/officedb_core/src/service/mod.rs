//! Entity use-case services.
//!
//! # Responsibility
//! - Combine id codec, filters, repository and mapper into entity-level calls.
//! - Classify every failure once into `ServiceError`.
//!
//! # Invariants
//! - Request fields are validated before any id is decoded or store call made.
//! - Every service call issues exactly one repository call.
//! - Decode failures are surfaced, never replaced by defaults.

use crate::model::id::IdError;
use crate::model::{DecodeError, ValidationError};
use crate::repo::document_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod entity_service;
pub mod person_service;
pub mod project_service;
pub mod ticket_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for entity use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Id string is not a valid store id.
    InvalidId(IdError),
    /// A required request field is missing or blank.
    Invalid(ValidationError),
    /// Lookup or mutation target does not exist.
    NotFound(String),
    /// Stored document does not satisfy the entity schema.
    Decode(DecodeError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Replaces the generic not-found message with a caller-facing one.
    pub(crate) fn describe_not_found(self, message: impl FnOnce() -> String) -> Self {
        match self {
            Self::NotFound(_) => Self::NotFound(message()),
            other => other,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(err) => write!(f, "{err}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidId(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Decode(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<IdError> for ServiceError {
    fn from(value: IdError) -> Self {
        Self::InvalidId(value)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<DecodeError> for ServiceError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::NotFound(value.to_string()),
            other => Self::Repo(other),
        }
    }
}
