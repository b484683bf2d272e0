//! SDK configuration
//!
//! Resolves the shared SDK configuration once per invocation and hands out
//! the storage and identity clients built from it.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use s3c_core::config::S3Settings;

use crate::client::S3Client;
use crate::sts::StsClient;

/// Resolved SDK configuration plus the settings that only apply to S3
pub struct Session {
    sdk: SdkConfig,
    force_path_style: bool,
}

impl Session {
    /// Load the SDK configuration from the default provider chain, applying
    /// the overrides from the configuration file
    pub async fn load(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk = loader.load().await;
        tracing::debug!(
            region = sdk.region().map(|r| r.as_ref()),
            endpoint = settings.endpoint.as_deref(),
            "loaded SDK configuration"
        );

        Self::from_sdk_config(sdk, settings.force_path_style)
    }

    /// Build a session from an already resolved SDK configuration
    pub fn from_sdk_config(sdk: SdkConfig, force_path_style: bool) -> Self {
        Self {
            sdk,
            force_path_style,
        }
    }

    /// Region in effect, if any was resolved
    pub fn region(&self) -> Option<&str> {
        self.sdk.region().map(|r| r.as_ref())
    }

    /// Storage client
    pub fn storage(&self) -> S3Client {
        S3Client::new(&self.sdk, self.force_path_style)
    }

    /// Identity client
    pub fn identity(&self) -> StsClient {
        StsClient::new(&self.sdk)
    }
}
