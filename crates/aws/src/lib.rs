//! s3c-aws: AWS SDK adapter for s3-client
//!
//! This crate provides the implementations of the ObjectStore and
//! IdentityService traits using aws-sdk-s3 and aws-sdk-sts. It is the only
//! crate that directly depends on the AWS SDK.

pub mod client;
mod error;
pub mod session;
pub mod sts;

pub use client::S3Client;
pub use session::Session;
pub use sts::StsClient;
