//! In-memory store for tests and local development
//!
//! Implements both ports over `object_store::memory::InMemory`. Source-side
//! objects are addressed as `bucket/key`; destination-side objects by key
//! alone, mirroring how the real adapters are scoped.

use super::error::{StoreError, StoreResult};
use super::{DestinationStore, ObjectStream, SourceStore};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::memory::InMemory;
use object_store::{path::Path as ObjectPath, ObjectStore};

/// In-memory store implementing both storage ports
#[derive(Debug)]
pub struct MemoryStore {
    store: InMemory,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            store: InMemory::new(),
        }
    }

    /// Seed an object at `location` (use `bucket/key` for source-side data)
    pub async fn put(&self, location: &str, data: Bytes) -> StoreResult<()> {
        self.store
            .put(&ObjectPath::from(location), data.into())
            .await
            .map_err(|e| StoreError::Transport {
                store: "memory".to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Fetch the full content of an object, if present
    pub async fn get(&self, location: &str) -> Option<Bytes> {
        let result = self.store.get(&ObjectPath::from(location)).await.ok()?;
        result.bytes().await.ok()
    }
}

#[async_trait]
impl SourceStore for MemoryStore {
    async fn open(&self, bucket: &str, key: &str) -> StoreResult<ObjectStream> {
        let location = ObjectPath::from(format!("{bucket}/{key}"));

        let result = self.store.get(&location).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            other => StoreError::Transport {
                store: "memory".to_string(),
                message: other.to_string(),
            },
        })?;

        Ok(result
            .into_stream()
            .map_err(|e| std::io::Error::other(e.to_string()))
            .boxed())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl DestinationStore for MemoryStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        match self.store.head(&ObjectPath::from(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StoreError::Transport {
                store: "memory".to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn write(&self, key: &str, mut stream: ObjectStream) -> StoreResult<u64> {
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        let written = buffer.len() as u64;

        self.store
            .put(&ObjectPath::from(key), Bytes::from(buffer).into())
            .await
            .map_err(|e| StoreError::Transport {
                store: "memory".to_string(),
                message: e.to_string(),
            })?;

        Ok(written)
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_roundtrip() {
        let store = MemoryStore::new();
        store
            .put("raw-data/report.csv", Bytes::from_static(b"a,b,c\n1,2,3\n"))
            .await
            .unwrap();

        let mut stream = SourceStore::open(&store, "raw-data", "report.csv")
            .await
            .unwrap();
        let mut content = Vec::new();
        while let Some(chunk) = stream.next().await {
            content.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(content, b"a,b,c\n1,2,3\n");
    }

    #[tokio::test]
    async fn test_open_missing_object() {
        let store = MemoryStore::new();
        let err = match SourceStore::open(&store, "raw-data", "missing.csv").await {
            Ok(_) => panic!("expected open of missing object to fail"),
            Err(e) => e,
        };
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_exists_and_write() {
        let store = MemoryStore::new();
        assert!(!store.exists("report.csv").await.unwrap());

        let source = MemoryStore::new();
        source
            .put("raw-data/report.csv", Bytes::from_static(b"payload"))
            .await
            .unwrap();
        let stream = SourceStore::open(&source, "raw-data", "report.csv")
            .await
            .unwrap();

        let written = store.write("report.csv", stream).await.unwrap();
        assert_eq!(written, 7);
        assert!(store.exists("report.csv").await.unwrap());
        assert_eq!(
            store.get("report.csv").await.unwrap(),
            Bytes::from_static(b"payload")
        );
    }
}
