//! Identity lookup through STS

use async_trait::async_trait;
use aws_config::SdkConfig;

use s3c_core::{CallerIdentity, IdentityService, Result};

use crate::error::map_sdk_error;

/// STS client wrapper
pub struct StsClient {
    inner: aws_sdk_sts::Client,
}

impl StsClient {
    /// Create an STS client sharing the given SDK configuration
    pub fn new(sdk: &SdkConfig) -> Self {
        Self {
            inner: aws_sdk_sts::Client::new(sdk),
        }
    }
}

#[async_trait]
impl IdentityService for StsClient {
    async fn caller_identity(&self) -> Result<CallerIdentity> {
        tracing::debug!("GetCallerIdentity");
        let response = self
            .inner
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "caller identity"))?;

        Ok(CallerIdentity {
            user_id: response.user_id().map(str::to_string),
            account: response.account().map(str::to_string),
            arn: response.arn().map(str::to_string),
        })
    }
}
