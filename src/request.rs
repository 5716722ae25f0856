//! Replication request parsing and validation
//!
//! Validation is a pure function over the raw JSON payload: no storage call
//! happens before a request has been accepted.

use serde_json::Value;
use thiserror::Error;

/// Rejected request payload
///
/// The display string is the exact message surfaced to HTTP callers in the
/// 400 response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing s3_bucket or s3_key in JSON payload")]
pub struct ValidationError;

/// A validated request to replicate one object
///
/// Identifies the source object; by convention the destination object is
/// written under the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationRequest {
    /// Bucket the object is read from
    pub source_bucket: String,

    /// Key of the object within the source bucket
    pub source_key: String,
}

impl ReplicationRequest {
    /// Key the object is written under at the destination
    pub fn destination_key(&self) -> &str {
        &self.source_key
    }
}

/// Validate a raw request payload
///
/// Both `s3_bucket` and `s3_key` must be present, be strings, and be
/// non-empty. Absent fields, `null`, empty strings, and non-string values
/// all fail. Payloads that are not JSON objects fail for the same reason.
pub fn validate(payload: &Value) -> Result<ReplicationRequest, ValidationError> {
    let source_bucket = payload
        .get("s3_bucket")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let source_key = payload
        .get("s3_key")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if source_bucket.is_empty() || source_key.is_empty() {
        return Err(ValidationError);
    }

    Ok(ReplicationRequest {
        source_bucket: source_bucket.to_string(),
        source_key: source_key.to_string(),
    })
}
