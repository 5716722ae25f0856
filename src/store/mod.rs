//! Storage ports for the replication engine
//!
//! Two capability interfaces abstract the storage backends: a `SourceStore`
//! the object is read from and a `DestinationStore` it is written to. Each
//! trait carries exactly the operations the engine needs; concrete adapters
//! (S3 source, GCS destination, in-memory substitute) live beside the
//! traits and are injected at startup.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use ferry::store::{DestinationStore, MemoryStore, SourceStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = MemoryStore::new();
//!     source.put("raw-data/report.csv", Bytes::from_static(b"a,b\n")).await?;
//!
//!     let destination = MemoryStore::new();
//!     let stream = source.open("raw-data", "report.csv").await?;
//!     let bytes = destination.write("report.csv", stream).await?;
//!     assert_eq!(bytes, 4);
//!     assert!(destination.exists("report.csv").await?);
//!     Ok(())
//! }
//! ```

pub mod error;

mod gcs;
mod memory;
mod s3;

pub use error::{StoreError, StoreResult};
pub use gcs::GcsStore;
pub use memory::MemoryStore;
pub use s3::{S3Options, S3Store};

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Async byte stream of one object's content
///
/// An ownership-exclusive handle: acquired from a `SourceStore`, consumed by
/// a `DestinationStore` within the same request, and released on drop along
/// every exit path.
pub type ObjectStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Backend the object is copied from
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Open the object at `bucket`/`key` for reading
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the object doesn't exist,
    /// `StoreError::AccessDenied` if read access is denied, and
    /// `StoreError::Transport` for network or backend failures.
    async fn open(&self, bucket: &str, key: &str) -> StoreResult<ObjectStream>;

    /// String identifier for this store (e.g. "s3", "memory")
    fn store_name(&self) -> &str;
}

/// Backend the object is copied to
///
/// The destination bucket is fixed per store instance; operations address
/// objects by key only.
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Check whether an object already exists under `key`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Transport` for network or backend failures.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Write a full object under `key`, consuming the stream
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Transport` for network or backend failures and
    /// `StoreError::QuotaExceeded` when the backend rejects the write for
    /// capacity reasons. A failure mid-stream may leave an incomplete upload
    /// behind; no compensation is attempted.
    async fn write(&self, key: &str, stream: ObjectStream) -> StoreResult<u64>;

    /// String identifier for this store (e.g. "gcs", "memory")
    fn store_name(&self) -> &str;
}
