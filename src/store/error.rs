//! Error types for storage port operations

use std::io;
use thiserror::Error;

/// Result type alias for storage port operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur against a source or destination store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Object not found at the source
    #[error("object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Access denied by the backend
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Network or backend-service failure
    #[error("transport error on {store}: {message}")]
    Transport { store: String, message: String },

    /// Storage quota exceeded at the destination
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Invalid client configuration
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while consuming an object stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Check if this error indicates the object was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
