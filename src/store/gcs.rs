//! Google Cloud Storage destination adapter
//!
//! Authentication comes from the environment
//! (`GOOGLE_APPLICATION_CREDENTIALS` or `GOOGLE_SERVICE_ACCOUNT` +
//! `GOOGLE_SERVICE_ACCOUNT_KEY`), resolved by the `object_store` builder.
//! Writes go through a multipart upload with a bounded number of in-flight
//! parts, so arbitrarily large objects transfer without being buffered
//! whole.

use super::error::{StoreError, StoreResult};
use super::{DestinationStore, ObjectStream};
use async_trait::async_trait;
use futures::StreamExt;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::{path::Path as ObjectPath, ObjectStore, WriteMultipart};
use std::sync::Arc;

/// Maximum concurrent multipart chunks in flight during a write
const MAX_IN_FLIGHT_PARTS: usize = 8;

/// Google Cloud Storage destination store
///
/// The bucket is fixed at construction; objects are addressed by key only.
pub struct GcsStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl GcsStore {
    /// Create a new GCS destination store for `bucket`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidConfig` if the bucket name is invalid or
    /// credentials cannot be resolved from the environment.
    pub async fn new(bucket: &str) -> StoreResult<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| {
                StoreError::InvalidConfig(format!("failed to create GCS client: {e}"))
            })?;

        Ok(Self {
            store: Arc::new(store),
            bucket: bucket.to_string(),
        })
    }

    fn classify_write_error(&self, key: &str, err: object_store::Error) -> StoreError {
        classify_write_error_impl(&self.bucket, key, err)
    }
}

/// Map a write-side failure onto the port error taxonomy (standalone for
/// testing)
fn classify_write_error_impl(bucket: &str, key: &str, err: object_store::Error) -> StoreError {
    let message = err.to_string();
    if message.contains("quota") || message.contains("Quota") {
        return StoreError::QuotaExceeded(format!("cannot write {bucket}/{key}: {message}"));
    }
    StoreError::Transport {
        store: "gcs".to_string(),
        message: format!("failed to write {bucket}/{key}: {message}"),
    }
}

#[async_trait]
impl DestinationStore for GcsStore {
    #[tracing::instrument(
        skip(self),
        fields(
            otel.kind = "client",
            store = "gcs",
            bucket = %self.bucket,
            key
        )
    )]
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let location = ObjectPath::from(key);

        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StoreError::Transport {
                store: "gcs".to_string(),
                message: format!("failed to probe {}/{key}: {e}", self.bucket),
            }),
        }
    }

    #[tracing::instrument(
        skip(self, stream),
        fields(
            otel.kind = "client",
            store = "gcs",
            bucket = %self.bucket,
            key
        )
    )]
    async fn write(&self, key: &str, mut stream: ObjectStream) -> StoreResult<u64> {
        let location = ObjectPath::from(key);

        let upload = self
            .store
            .put_multipart(&location)
            .await
            .map_err(|e| self.classify_write_error(key, e))?;
        let mut writer = WriteMultipart::new(upload);
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len() as u64;
            writer
                .wait_for_capacity(MAX_IN_FLIGHT_PARTS)
                .await
                .map_err(|e| self.classify_write_error(key, e))?;
            writer.write(&chunk);
        }

        // An error above abandons the multipart upload; the incomplete
        // object is never visible under `key`.
        writer
            .finish()
            .await
            .map_err(|e| self.classify_write_error(key, e))?;

        Ok(written)
    }

    fn store_name(&self) -> &str {
        "gcs"
    }
}
