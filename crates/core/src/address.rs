//! Object address parsing
//!
//! Handles the two address forms accepted on the command line:
//! `bucket[/key]` and `s3://bucket[/key]`.

use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Error, Result};

const S3_SCHEME_PREFIX: &str = "s3://";

/// A bucket plus an object key (or key prefix)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Bucket name
    pub bucket: String,
    /// Object key or prefix (empty for the bucket root)
    pub key: String,
}

impl ObjectRef {
    /// Create a new ObjectRef
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Key as an optional request field; an empty key is absent
    pub fn key_prefix(&self) -> Option<&str> {
        (!self.key.is_empty()).then_some(self.key.as_str())
    }

    /// Local file name derived from the key, with every `/` replaced by `_`
    pub fn flat_file_name(&self) -> String {
        self.key.replace('/', "_")
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}/{}", self.bucket, self.key)
        }
    }
}

/// Parse an address string into an ObjectRef
///
/// Plain addresses are split on the first `/` only, so `b/x/y` yields
/// bucket `b` and key `x/y`. `s3://` addresses go through URI parsing: the
/// host is the bucket and the percent-decoded path, minus its leading
/// slash, is the key.
///
/// When `need_key` is set an empty key is rejected.
pub fn parse_object(arg: &str, need_key: bool) -> Result<ObjectRef> {
    let object = if arg.starts_with(S3_SCHEME_PREFIX) {
        parse_s3_uri(arg)?
    } else {
        match arg.split_once('/') {
            Some((bucket, key)) => ObjectRef::new(bucket, key),
            None => ObjectRef::new(arg, ""),
        }
    };

    if object.bucket.is_empty() {
        return Err(Error::InvalidAddress(format!("'{arg}' has no bucket")));
    }

    if need_key && object.key.is_empty() {
        return Err(Error::NeedKey(arg.to_string()));
    }

    Ok(object)
}

fn parse_s3_uri(arg: &str) -> Result<ObjectRef> {
    let url = Url::parse(arg)?;

    let bucket = url.host_str().unwrap_or_default();
    let path = url.path().strip_prefix('/').unwrap_or(url.path());
    let key = percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| Error::InvalidAddress(format!("'{arg}' is not valid UTF-8 once decoded")))?;

    Ok(ObjectRef::new(bucket, key))
}
