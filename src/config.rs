//! Environment-driven service configuration
//!
//! All settings come from the process environment, resolved once at startup.
//! Storage credentials are not read here: the S3 client resolves the AWS
//! credential chain itself and the GCS client reads
//! `GOOGLE_APPLICATION_CREDENTIALS`, so configuration stays limited to
//! addressing and transport knobs.

use std::env;
use std::path::PathBuf;

use crate::error::{FerryError, Result};
use crate::store::S3Options;

const DEFAULT_PORT: u16 = 5000;

/// Service configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listen host (`FERRY_HOST`, default `127.0.0.1`)
    pub host: String,

    /// Listen port (`FERRY_PORT`, default `5000`)
    pub port: u16,

    /// Destination GCS bucket (`GCP_BUCKET_NAME`, required)
    pub destination_bucket: String,

    /// Source S3 client options (`AWS_REGION`, `S3_ENDPOINT_URL`,
    /// `S3_FORCE_PATH_STYLE`)
    pub s3: S3Options,

    /// Optional log file (`FERRY_LOG_FILE`); JSON-formatted when set
    pub log_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolve the configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `FerryError::Config` if `GCP_BUCKET_NAME` is unset or
    /// `FERRY_PORT` is not a valid port number.
    pub fn from_env() -> Result<Self> {
        let host = env::var("FERRY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = match env::var("FERRY_PORT") {
            Err(_) => DEFAULT_PORT,
            Ok(raw) => raw
                .parse()
                .map_err(|_| FerryError::Config(format!("invalid FERRY_PORT: {raw}")))?,
        };

        let destination_bucket = env::var("GCP_BUCKET_NAME")
            .map_err(|_| FerryError::Config("GCP_BUCKET_NAME must be set".to_string()))?;

        let s3 = S3Options {
            region: env::var("AWS_REGION").ok(),
            endpoint: env::var("S3_ENDPOINT_URL").ok(),
            force_path_style: env::var("S3_FORCE_PATH_STYLE")
                .map(|v| flag_enabled(&v))
                .unwrap_or(false),
            ..S3Options::default()
        };

        let log_file = env::var("FERRY_LOG_FILE").ok().map(PathBuf::from);

        Ok(Self {
            host,
            port,
            destination_bucket,
            s3,
            log_file,
        })
    }

    /// Socket address string the server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Interpret an environment flag value
fn flag_enabled(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
