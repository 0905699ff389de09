use std::fmt;

use sea_orm::error::DbErr;
use serde::Serialize;

use crate::models::Unit;

/// Error taxonomy for catalog and ledger operations.
///
/// Absent keys on deletion are benign no-ops and never reach this type;
/// `NotFound` is raised only when an operation needs the entry to exist
/// (catalog resolution). Persistence errors abort the single interaction
/// that triggered them.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Catalog storage error: {0}")]
    CatalogIo(#[from] std::io::Error),

    #[error("Catalog format error: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("Event error: {0}")]
    EventError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Non-blocking advisory raised when a catalog entry's free-text
/// presentation names a unit that contradicts the declared one.
///
/// The input is still accepted; the operator sees the advisory and
/// decides. This is a value returned alongside success, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyWarning {
    pub declared: Unit,
    pub implied: Unit,
    pub presentation: String,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "declared unit '{}' but presentation \"{}\" reads as '{}'",
            self.declared, self.presentation, self.implied
        )
    }
}
