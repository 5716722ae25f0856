//! Error types for Ferry

use thiserror::Error;

use crate::store::StoreError;

/// Result type alias for service-level operations
pub type Result<T> = std::result::Result<T, FerryError>;

/// Errors raised by service plumbing (configuration, startup, serving).
///
/// Failures of the replication operation itself are `StoreError` values;
/// they are wrapped here only when they abort service bootstrap.
#[derive(Error, Debug)]
pub enum FerryError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage client construction or operation failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O error (socket bind, serve loop)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
