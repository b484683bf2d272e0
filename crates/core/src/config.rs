//! Configuration management
//!
//! This module handles loading the optional s3-client configuration file.
//! The file is TOML, stored at `$S3C_CONFIG_DIR/config.toml` or
//! `~/.config/s3-client/config.toml`.
//!
//! Credentials never live here; they come from the AWS default provider chain.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "S3C_CONFIG_DIR";

/// Default lifetime of a presigned URL, in seconds
const DEFAULT_PRESIGN_EXPIRES_SECS: u64 = 900;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Client construction overrides
    #[serde(default)]
    pub s3: S3Settings,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Lifetime of URLs produced by `private-url`
    #[serde(default = "default_presign_expires")]
    pub presign_expires_secs: u64,
}

/// Overrides applied on top of the SDK's default configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Settings {
    /// Region, replacing whatever the provider chain resolves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Endpoint URL for S3-compatible services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Use path-style addressing instead of virtual-hosted buckets
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_presign_expires() -> u64 {
    DEFAULT_PRESIGN_EXPIRES_SECS
}

impl Defaults {
    /// Presigned URL lifetime as a Duration
    pub fn presign_expires(&self) -> Duration {
        Duration::from_secs(self.presign_expires_secs)
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            presign_expires_secs: default_presign_expires(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            s3: S3Settings::default(),
        }
    }
}

/// Configuration manager handles locating and loading the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("could not determine config directory".into()))?
                .join("s3-client"),
        };
        Ok(Self::with_path(config_dir.join("config.toml")))
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// A missing file yields the default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "configuration file version {} is newer than supported version {}",
                config.schema_version, SCHEMA_VERSION
            )));
        }
        config.schema_version = SCHEMA_VERSION;

        Ok(config)
    }
}
