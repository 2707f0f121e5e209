//! Storage-specific error types.
//!
//! These errors describe persistence failures. Conversion failures when reading a
//! record back are reported as [`StorageError::DataCorruption`]: the record passed
//! validation when it was written, so a failure on load means the stored data was
//! altered outside the domain, not that a user sent bad input.

use crate::error::{DomainError, ErrorKind};
use std::fmt;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The requested record was not found.
    NotFound { resource_type: String, id: String },

    /// A record with this key already exists.
    AlreadyExists { resource_type: String, id: String },

    /// The record changed since the caller read it (optimistic locking failure).
    ConcurrentModification {
        resource_type: String,
        id: String,
        expected_version: String,
        actual_version: String,
    },

    /// A stored record no longer satisfies the domain rules.
    DataCorruption {
        resource_type: String,
        id: Option<String>,
        details: String,
    },

    /// The write would break an aggregate rule (e.g. moving a joke to another author).
    Rejected(DomainError),

    /// Serialization of a record failed.
    Serialization {
        message: String,
        data_type: Option<String>,
    },

    /// Generic internal storage error.
    Internal { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound { resource_type, id } => {
                write!(f, "{} not found: {}", resource_type, id)
            }
            StorageError::AlreadyExists { resource_type, id } => {
                write!(f, "{} already exists: {}", resource_type, id)
            }
            StorageError::ConcurrentModification {
                resource_type,
                id,
                expected_version,
                actual_version,
            } => {
                write!(
                    f,
                    "Concurrent modification of {} {}: expected version {}, found {}",
                    resource_type, id, expected_version, actual_version
                )
            }
            StorageError::DataCorruption {
                resource_type,
                id,
                details,
            } => {
                if let Some(id) = id {
                    write!(f, "Corrupted {} record {}: {}", resource_type, id, details)
                } else {
                    write!(f, "Corrupted {} record: {}", resource_type, details)
                }
            }
            StorageError::Rejected(rule) => write!(f, "Write rejected: {}", rule),
            StorageError::Serialization { message, data_type } => {
                if let Some(data_type) = data_type {
                    write!(f, "Serialization error for {}: {}", data_type, message)
                } else {
                    write!(f, "Serialization error: {}", message)
                }
            }
            StorageError::Internal { message } => write!(f, "Internal storage error: {}", message),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Rejected(rule) => Some(rule),
            _ => None,
        }
    }
}

impl StorageError {
    /// Create a not found error.
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Create an already-exists error.
    pub fn already_exists(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self::AlreadyExists {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Create a data corruption error for a record that failed to load.
    pub fn corrupted(
        resource_type: impl Into<String>,
        id: Option<String>,
        details: impl ToString,
    ) -> Self {
        Self::DataCorruption {
            resource_type: resource_type.into(),
            id,
            details: details.to_string(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether retrying after a fresh read could succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::ConcurrentModification { .. })
    }

    /// Classification used to choose a response status.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::NotFound { .. } => ErrorKind::NotFound,
            StorageError::AlreadyExists { .. } | StorageError::ConcurrentModification { .. } => {
                ErrorKind::Conflict
            }
            StorageError::DataCorruption { .. } => ErrorKind::DataCorruption,
            StorageError::Rejected(rule) => rule.kind(),
            StorageError::Serialization { .. } | StorageError::Internal { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::Serialization {
            message: error.to_string(),
            data_type: None,
        }
    }
}

impl From<DomainError> for StorageError {
    fn from(rule: DomainError) -> Self {
        StorageError::Rejected(rule)
    }
}
