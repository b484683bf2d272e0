//! Error types for s3c-core
//!
//! Every failure aborts the current invocation; the CLI prints the message
//! and exits non-zero.

use thiserror::Error;

/// Result type alias for s3c-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3-client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or excess positional arguments
    #[error("invalid arguments")]
    InvalidArguments,

    /// No subcommand given at all
    #[error("need argument")]
    MissingCommand,

    /// Subcommand name not recognized
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Address has no key but the operation needs one
    #[error("need key: {0}")]
    NeedKey(String),

    /// Address could not be interpreted
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// URL parsing error
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A delete batch referenced more than one bucket
    #[error("cannot delete multiple bucket objects at once")]
    CrossBucketDelete,

    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bucket or object does not exist; carries the service's message
    #[error("{0}")]
    NotFound(String),

    /// Request rejected by the service for lack of permission
    #[error("{0}")]
    AccessDenied(String),

    /// Any other error reported by the remote service
    #[error("{0}")]
    Service(String),
}

impl Error {
    /// Whether the error was reported by the remote service rather than
    /// raised locally
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::AccessDenied(_) | Error::Service(_)
        )
    }
}
