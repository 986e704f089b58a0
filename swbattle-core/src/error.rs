//! Error types for catalog operations

use thiserror::Error;

/// Errors raised by the resource catalog and category parsing
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown battle category: {0}")]
    UnknownCategory(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
