//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3c-core.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::{ByteStream, DateTime};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_smithy_types::byte_stream::Length;

use s3c_core::{
    common_bucket, BucketInfo, Error, ListResult, ObjectBody, ObjectInfo, ObjectRef, ObjectStore,
    PutObjectRequest, Result,
};

use crate::error::map_sdk_error;

/// Maximum number of keys accepted by a single DeleteObjects request
const DELETE_BATCH_LIMIT: usize = 1000;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from a resolved SDK configuration
    pub fn new(sdk: &SdkConfig, force_path_style: bool) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk)
            .force_path_style(force_path_style)
            .build();

        Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        }
    }
}

fn timestamp(value: Option<&DateTime>) -> Option<jiff::Timestamp> {
    value.and_then(|t| jiff::Timestamp::from_second(t.secs()).ok())
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        tracing::debug!("ListBuckets");
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "buckets"))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| BucketInfo {
                name: b.name().unwrap_or_default().to_string(),
                created: timestamp(b.creation_date()),
            })
            .collect();

        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> Result<ListResult> {
        tracing::debug!(bucket, prefix, "ListObjectsV2");
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(prefix.map(str::to_string))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket))?;

        let items = response
            .contents()
            .iter()
            .map(|object| ObjectInfo {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or(0),
                last_modified: timestamp(object.last_modified()),
            })
            .collect();

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
        })
    }

    async fn get_object(&self, object: &ObjectRef) -> Result<ObjectBody> {
        tracing::debug!(%object, "GetObject");
        let response = self
            .inner
            .get_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &object.to_string()))?;

        let content_length = response.content_length();
        Ok(ObjectBody::new(response.body.into_async_read()).with_content_length(content_length))
    }

    async fn put_object(&self, request: PutObjectRequest) -> Result<()> {
        let PutObjectRequest {
            object,
            body,
            content_length,
            content_type,
        } = request;
        tracing::debug!(
            %object,
            content_length,
            content_type = content_type.as_deref(),
            "PutObject"
        );

        let length = u64::try_from(content_length).map_err(|_| Error::InvalidArguments)?;
        let body = ByteStream::read_from()
            .file(body)
            .length(Length::Exact(length))
            .build()
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;

        self.inner
            .put_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .body(body)
            .content_length(content_length)
            .set_content_type(content_type)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &object.to_string()))?;

        Ok(())
    }

    async fn delete_objects(&self, objects: &[ObjectRef]) -> Result<()> {
        let Some(bucket) = common_bucket(objects)? else {
            return Ok(());
        };

        for chunk in objects.chunks(DELETE_BATCH_LIMIT) {
            tracing::debug!(bucket, count = chunk.len(), "DeleteObjects");

            let identifiers = chunk
                .iter()
                .map(|o| {
                    ObjectIdentifier::builder()
                        .key(&o.key)
                        .build()
                        .map_err(|e| Error::InvalidAddress(e.to_string()))
                })
                .collect::<Result<Vec<_>>>()?;

            let delete = Delete::builder()
                .set_objects(Some(identifiers))
                .build()
                .map_err(|e| Error::InvalidAddress(e.to_string()))?;

            let response = self
                .inner
                .delete_objects()
                .bucket(bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| map_sdk_error(e, bucket))?;

            if !response.errors().is_empty() {
                let failed: Vec<String> = response
                    .errors()
                    .iter()
                    .map(|e| {
                        format!(
                            "{}/{}: {}",
                            bucket,
                            e.key().unwrap_or_default(),
                            e.message().or(e.code()).unwrap_or("unknown error")
                        )
                    })
                    .collect();
                tracing::warn!("Failed to delete some objects: {:?}", failed);
                return Err(Error::Service(failed.join("; ")));
            }
        }

        Ok(())
    }

    async fn presign_get(&self, object: &ObjectRef, expires_in: Duration) -> Result<String> {
        tracing::debug!(%object, expires_in = expires_in.as_secs(), "presign GetObject");
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| Error::Config(e.to_string()))?;

        let request = self
            .inner
            .get_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .presigned(presigning)
            .await
            .map_err(|e| map_sdk_error(e, &object.to_string()))?;

        Ok(request.uri().to_string())
    }
}
