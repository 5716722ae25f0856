//! Amazon S3 source adapter
//!
//! Credentials resolve through the standard AWS chain (environment,
//! profile, instance metadata); only addressing and transport knobs are
//! configured here. The bucket is supplied per call because the replication
//! request names it.

use super::error::{StoreError, StoreResult};
use super::{ObjectStream, SourceStore};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// S3 client options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Options {
    /// AWS region (e.g. "us-east-1"); falls back to the provider chain
    pub region: Option<String>,

    /// Custom endpoint URL (for S3-compatible services like MinIO)
    pub endpoint: Option<String>,

    /// Path-style addressing (required for some S3-compatible services)
    pub force_path_style: bool,

    /// Per-operation timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for S3Options {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            force_path_style: false,
            timeout_seconds: 300,
        }
    }
}

/// S3 source store
///
/// # Example
///
/// ```no_run
/// use ferry::store::{S3Options, S3Store, SourceStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = S3Store::new(S3Options::default()).await?;
///     let stream = store.open("raw-data", "report.csv").await?;
///     # let _ = stream;
///     Ok(())
/// }
/// ```
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Create a new S3 source store from options
    pub async fn new(options: S3Options) -> StoreResult<Self> {
        let client = Self::build_aws_client(&options).await;
        Ok(Self { client })
    }

    /// Build the AWS SDK S3 client from options
    async fn build_aws_client(options: &S3Options) -> Client {
        let region_provider = if let Some(region) = &options.region {
            RegionProviderChain::first_try(Region::new(region.clone()))
        } else {
            RegionProviderChain::default_provider()
        };

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&aws_config);

        if let Some(endpoint) = &options.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        if options.force_path_style {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        let timeout_config = aws_sdk_s3::config::timeout::TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(options.timeout_seconds))
            .build();
        s3_config_builder = s3_config_builder.timeout_config(timeout_config);

        Client::from_conf(s3_config_builder.build())
    }
}

#[async_trait]
impl SourceStore for S3Store {
    async fn open(&self, bucket: &str, key: &str) -> StoreResult<ObjectStream> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_get_error(bucket, key, &e.to_string()))?;

        // Convert the AWS ByteStream into chunked reads so the caller never
        // needs the whole object in memory.
        use futures::stream;
        use tokio::io::AsyncReadExt;

        let reader = output.body.into_async_read();
        const CHUNK_SIZE: usize = 1024 * 1024; // 1 MB chunks

        let stream = stream::unfold(
            (reader, vec![0u8; CHUNK_SIZE]),
            |(mut reader, mut buffer)| async move {
                match reader.read(&mut buffer).await {
                    Ok(0) => None, // EOF
                    Ok(n) => {
                        let data = Bytes::copy_from_slice(&buffer[..n]);
                        Some((Ok(data), (reader, buffer)))
                    }
                    Err(e) => Some((Err(e), (reader, buffer))),
                }
            },
        );

        Ok(Box::pin(stream))
    }

    fn store_name(&self) -> &str {
        "s3"
    }
}

/// Map a GetObject failure onto the port error taxonomy (standalone for
/// testing)
fn classify_get_error(bucket: &str, key: &str, message: &str) -> StoreError {
    if message.contains("NoSuchKey") || message.contains("NoSuchBucket") || message.contains("404")
    {
        return StoreError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };
    }
    if message.contains("AccessDenied") || message.contains("403") {
        return StoreError::AccessDenied(format!("cannot read {bucket}/{key}: {message}"));
    }
    StoreError::Transport {
        store: "s3".to_string(),
        message: format!("failed to get {bucket}/{key}: {message}"),
    }
}
