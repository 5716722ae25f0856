//! Replication engine
//!
//! Orchestrates one replication attempt: idempotency probe against the
//! destination, source read, destination write. The engine is stateless and
//! holds no cross-request state; stores are injected per call. No retries.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use ferry::engine::{replicate, ReplicationOutcome};
//! use ferry::request::ReplicationRequest;
//! use ferry::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = MemoryStore::new();
//!     source.put("raw-data/report.csv", Bytes::from_static(b"a,b\n")).await?;
//!     let destination = MemoryStore::new();
//!
//!     let request = ReplicationRequest {
//!         source_bucket: "raw-data".to_string(),
//!         source_key: "report.csv".to_string(),
//!     };
//!     let outcome = replicate(&request, &source, &destination).await?;
//!     assert_eq!(outcome, ReplicationOutcome::Completed { bytes: 4 });
//!     Ok(())
//! }
//! ```

use crate::request::ReplicationRequest;
use crate::store::{DestinationStore, SourceStore, StoreError};

/// Outcome of a replication call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicationOutcome {
    /// Destination already holds the object; no bytes were transferred
    AlreadyExists,
    /// Object was copied; `bytes` is the transferred size
    Completed { bytes: u64 },
}

/// Result of one replication attempt
///
/// Error kinds carry the failure taxonomy; the HTTP boundary maps them to
/// status codes.
pub type ReplicationResult = Result<ReplicationOutcome, StoreError>;

/// Replicate one object from the source store to the destination store
///
/// Performs at most one existence probe and one write against the
/// destination and exactly one read against the source. The probe and the
/// write are not atomic: concurrent calls for the same key may both
/// transfer (last write wins, no corruption). Any failure propagates
/// unchanged; no compensation is attempted. Dropping the returned future
/// aborts the in-flight transfer and releases the stream.
#[tracing::instrument(
    skip(source, destination),
    fields(bucket = %request.source_bucket, key = %request.source_key)
)]
pub async fn replicate(
    request: &ReplicationRequest,
    source: &dyn SourceStore,
    destination: &dyn DestinationStore,
) -> ReplicationResult {
    let key = request.destination_key();

    if destination.exists(key).await? {
        tracing::info!(
            store = destination.store_name(),
            "object already exists at destination, skipping transfer"
        );
        return Ok(ReplicationOutcome::AlreadyExists);
    }

    tracing::info!(store = source.store_name(), "opening object at source");
    let stream = source.open(&request.source_bucket, key).await?;

    tracing::info!(store = destination.store_name(), "writing object to destination");
    let bytes = destination.write(key, stream).await?;

    tracing::info!(bytes, "object replicated");
    Ok(ReplicationOutcome::Completed { bytes })
}
