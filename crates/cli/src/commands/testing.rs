//! In-memory service fakes for command tests

use std::collections::HashMap;
use std::io;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context as TaskContext, Poll};
use std::time::Duration;

use async_trait::async_trait;
use jiff::tz::TimeZone;
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

use s3c_core::{
    BucketInfo, CallerIdentity, Error, IdentityService, ListResult, ObjectBody, ObjectRef,
    ObjectStore, PutObjectRequest, Result,
};

use super::Context;
use crate::output::Printer;

/// A recorded service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListBuckets,
    ListObjects {
        bucket: String,
        prefix: Option<String>,
    },
    GetObject(ObjectRef),
    PutObject {
        object: ObjectRef,
        content_length: i64,
        content_type: Option<String>,
        body: Vec<u8>,
    },
    DeleteObjects(Vec<ObjectRef>),
    PresignGet(ObjectRef, Duration),
}

/// Object store serving canned responses and recording every call
#[derive(Default)]
pub struct MemoryStore {
    buckets: Vec<BucketInfo>,
    listing: ListResult,
    objects: HashMap<ObjectRef, Vec<u8>>,
    /// Objects whose body fails after yielding the stored bytes
    broken: HashMap<ObjectRef, Vec<u8>>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryStore {
    pub fn with_buckets(mut self, buckets: Vec<BucketInfo>) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn with_listing(mut self, listing: ListResult) -> Self {
        self.listing = listing;
        self
    }

    pub fn with_object(mut self, object: ObjectRef, data: impl Into<Vec<u8>>) -> Self {
        self.objects.insert(object, data.into());
        self
    }

    pub fn with_broken_object(mut self, object: ObjectRef, data: impl Into<Vec<u8>>) -> Self {
        self.broken.insert(object, data.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Reader that fails on every read, standing in for a dropped connection
pub struct ResetReader;

impl AsyncRead for ResetReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut TaskContext<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        )))
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        self.record(Call::ListBuckets);
        Ok(self.buckets.clone())
    }

    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> Result<ListResult> {
        self.record(Call::ListObjects {
            bucket: bucket.to_string(),
            prefix: prefix.map(str::to_string),
        });
        Ok(self.listing.clone())
    }

    async fn get_object(&self, object: &ObjectRef) -> Result<ObjectBody> {
        self.record(Call::GetObject(object.clone()));

        if let Some(data) = self.broken.get(object) {
            let reader = io::Cursor::new(data.clone()).chain(ResetReader);
            return Ok(ObjectBody::new(reader));
        }

        match self.objects.get(object) {
            Some(data) => {
                let length = i64::try_from(data.len()).ok();
                Ok(ObjectBody::new(io::Cursor::new(data.clone())).with_content_length(length))
            }
            None => Err(Error::NotFound(object.to_string())),
        }
    }

    async fn put_object(&self, request: PutObjectRequest) -> Result<()> {
        let PutObjectRequest {
            object,
            mut body,
            content_length,
            content_type,
        } = request;

        let mut data = Vec::new();
        body.read_to_end(&mut data).await?;

        self.record(Call::PutObject {
            object,
            content_length,
            content_type,
            body: data,
        });
        Ok(())
    }

    async fn delete_objects(&self, objects: &[ObjectRef]) -> Result<()> {
        self.record(Call::DeleteObjects(objects.to_vec()));
        Ok(())
    }

    async fn presign_get(&self, object: &ObjectRef, expires_in: Duration) -> Result<String> {
        self.record(Call::PresignGet(object.clone(), expires_in));
        Ok(format!(
            "https://{}.example.test/{}?X-Amz-Expires={}",
            object.bucket,
            object.key,
            expires_in.as_secs()
        ))
    }
}

#[async_trait]
impl IdentityService for MemoryStore {
    async fn caller_identity(&self) -> Result<CallerIdentity> {
        Ok(CallerIdentity::default())
    }
}

/// Context over a MemoryStore, rendering timestamps in UTC
pub fn context(store: &MemoryStore) -> Context<'_> {
    Context {
        store,
        identity: store,
        region: Some("us-east-1"),
        presign_expires: Duration::from_secs(900),
        time_zone: TimeZone::UTC,
    }
}

/// Printer capturing both streams in memory
pub fn printer() -> Printer<Vec<u8>, Vec<u8>> {
    Printer::new(Vec::new(), Vec::new())
}

/// Captured streams as strings
pub fn output(printer: Printer<Vec<u8>, Vec<u8>>) -> (String, String) {
    let (out, err) = printer.into_parts();
    (
        String::from_utf8(out).expect("utf-8 stdout"),
        String::from_utf8(err).expect("utf-8 stderr"),
    )
}
