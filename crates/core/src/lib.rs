//! s3c-core: Core library for the s3-client CLI
//!
//! This crate provides the SDK-independent parts of s3-client:
//! - Address parsing (`bucket/key` and `s3://bucket/key`)
//! - ObjectStore and IdentityService traits for remote operations
//! - Streaming object bodies
//! - Configuration file loading
//!
//! Nothing here depends on the AWS SDK, so commands can be tested against
//! in-memory implementations of the traits.

pub mod address;
pub mod body;
pub mod config;
pub mod error;
pub mod traits;

pub use address::{parse_object, ObjectRef};
pub use body::ObjectBody;
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use traits::{
    common_bucket, BucketInfo, CallerIdentity, IdentityService, ListResult, ObjectInfo,
    ObjectStore, PutObjectRequest,
};
