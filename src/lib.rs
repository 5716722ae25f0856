/*!
 * Ferry - single-object replication between cloud object stores
 *
 * A small service that copies one named object from an S3 bucket into a
 * Google Cloud Storage bucket through a single synchronous HTTP operation:
 * - Idempotency probe against the destination before any transfer
 * - Streaming transfer with bounded memory for large objects
 * - Capability-scoped storage ports (`SourceStore` / `DestinationStore`)
 *   with in-memory substitutes for testing
 */

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod request;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use engine::{replicate, ReplicationOutcome, ReplicationResult};
pub use error::{FerryError, Result};
pub use request::{validate, ReplicationRequest, ValidationError};
pub use store::{DestinationStore, ObjectStream, SourceStore, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
