//! Error types for the catalog core
//!
//! The cache itself never fails; these cover the backend, configuration and
//! request validation.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::models::EntityId;

// == Repository Error Enum ==
/// Backend failure, passed through the read-through repositories unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record with the requested identifier
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// Constraint or uniqueness violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Backend unreachable
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for repository and backend operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

// == Config Error Enum ==
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file missing or unreadable
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid JSON for `Config`
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

// == Validation Errors ==
/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field violation found in one request payload.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}
