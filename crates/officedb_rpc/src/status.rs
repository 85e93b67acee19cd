//! Classified call outcome returned to gateway callers.
//!
//! # Invariants
//! - Every `ServiceError` maps to exactly one `Code`.
//! - Messages are single-line and never carry stored document contents.

use officedb_core::{DbError, RepoError, ServiceError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure class surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Code {
    /// Malformed id or missing required request field.
    InvalidArgument,
    /// Lookup or mutation target does not exist.
    NotFound,
    /// Store failure or a stored document violating its schema.
    Internal,
    DeadlineExceeded,
    Cancelled,
}

impl Code {
    /// Stable snake-case label used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed call: a code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: Code,
    pub message: String,
}

impl Status {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Code::Internal, message)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl Error for Status {}

impl From<ServiceError> for Status {
    fn from(value: ServiceError) -> Self {
        let code = match &value {
            ServiceError::InvalidId(_) | ServiceError::Invalid(_) => Code::InvalidArgument,
            ServiceError::NotFound(_) => Code::NotFound,
            ServiceError::Decode(_) => Code::Internal,
            ServiceError::Repo(RepoError::Db(DbError::DeadlineExceeded)) => {
                Code::DeadlineExceeded
            }
            ServiceError::Repo(RepoError::Db(DbError::Cancelled)) => Code::Cancelled,
            ServiceError::Repo(_) => Code::Internal,
        };
        Self::new(code, value.to_string().replace(['\n', '\r'], " "))
    }
}

impl From<DbError> for Status {
    fn from(value: DbError) -> Self {
        Self::from(ServiceError::Repo(RepoError::Db(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Code, Status};
    use officedb_core::{
        DbError, DecodeError, ObjectId, RepoError, ServiceError, ValidationError,
    };

    #[test]
    fn service_errors_map_to_one_code_each() {
        let cases = [
            (
                ServiceError::from(ObjectId::parse_str("nope").unwrap_err()),
                Code::InvalidArgument,
            ),
            (
                ServiceError::Invalid(ValidationError::BlankField("name")),
                Code::InvalidArgument,
            ),
            (ServiceError::NotFound("gone".to_string()), Code::NotFound),
            (
                ServiceError::Decode(DecodeError {
                    collection: "people",
                    id: ObjectId::new(),
                    message: "missing field `age`".to_string(),
                }),
                Code::Internal,
            ),
            (
                ServiceError::Repo(RepoError::Db(DbError::DeadlineExceeded)),
                Code::DeadlineExceeded,
            ),
            (
                ServiceError::Repo(RepoError::Db(DbError::Cancelled)),
                Code::Cancelled,
            ),
            (
                ServiceError::Repo(RepoError::InvalidData("bad".to_string())),
                Code::Internal,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(Status::from(error).code, expected);
        }
    }

    #[test]
    fn repo_not_found_becomes_not_found_status() {
        let status = Status::from(ServiceError::from(RepoError::NotFound("tickets")));
        assert_eq!(status.code, Code::NotFound);
        assert!(status.message.contains("tickets"));
    }

    #[test]
    fn display_prefixes_code_label() {
        let status = Status::not_found("person `Ana` not found");
        assert_eq!(status.to_string(), "not_found: person `Ana` not found");
    }
}
