//! ObjectStore and IdentityService trait definitions
//!
//! These traits define the remote operations the CLI needs, keeping the
//! command code decoupled from the AWS SDK.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::address::ObjectRef;
use crate::body::ObjectBody;
use crate::error::{Error, Result};

/// A bucket as returned by a bucket listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

/// An object as returned by an object listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size: i64,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
}

/// One page of an object listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether more objects exist beyond this page
    pub truncated: bool,
}

/// Upload request
#[derive(Debug)]
pub struct PutObjectRequest {
    /// Destination object
    pub object: ObjectRef,

    /// Opened local file streamed as the request body
    pub body: tokio::fs::File,

    /// Exact number of bytes to send
    pub content_length: i64,

    /// Content-Type header; `None` leaves it to the service
    pub content_type: Option<String>,
}

/// Identity of the caller as reported by the identity service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    /// Unique identifier of the calling entity
    pub user_id: Option<String>,

    /// Account that owns the calling entity
    pub account: Option<String>,

    /// ARN of the calling entity
    pub arn: Option<String>,
}

/// Trait for S3-compatible storage operations
///
/// Each method maps to exactly one service call; there is no retrying or
/// pagination at this level.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List buckets
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// List the first page of objects in a bucket, optionally under a prefix
    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> Result<ListResult>;

    /// Fetch an object body
    async fn get_object(&self, object: &ObjectRef) -> Result<ObjectBody>;

    /// Upload an object
    async fn put_object(&self, request: PutObjectRequest) -> Result<()>;

    /// Delete a batch of objects that all live in the same bucket
    async fn delete_objects(&self, objects: &[ObjectRef]) -> Result<()>;

    /// Generate a presigned GET URL valid for `expires_in`
    async fn presign_get(&self, object: &ObjectRef, expires_in: Duration) -> Result<String>;
}

/// Trait for the "who am I" lookup
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Ask the identity service who the current caller is
    async fn caller_identity(&self) -> Result<CallerIdentity>;
}

/// Return the bucket shared by every object in a delete batch.
///
/// Returns `Ok(None)` for an empty batch and [`Error::CrossBucketDelete`]
/// when the batch spans buckets. Runs before any request is issued.
pub fn common_bucket(objects: &[ObjectRef]) -> Result<Option<&str>> {
    let Some(first) = objects.first() else {
        return Ok(None);
    };

    if objects.iter().any(|o| o.bucket != first.bucket) {
        return Err(Error::CrossBucketDelete);
    }

    Ok(Some(first.bucket.as_str()))
}
