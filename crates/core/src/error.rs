//! Error types for s3t-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for s3t-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3t-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid remote path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// No profile matches the requested name or bucket
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Profile already exists
    #[error("Profile already exists: {0}")]
    ProfileExists(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Malformed shell-style match pattern
    #[error("Invalid match pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// Unknown listing style
    #[error("Invalid style: {0}. Use one of compact,verbose,nameonly")]
    InvalidStyle(String),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Local file missing or unreadable
    #[error("Local file not found: {}", .0.display())]
    LocalFileNotFound(PathBuf),

    /// Local file present where the operation refuses to overwrite
    #[error("Local file exists: {}", .0.display())]
    LocalFileExists(PathBuf),

    /// Remote key does not exist
    #[error("Remote object not found: {0}")]
    RemoteObjectNotFound(String),

    /// Bucket does not exist
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// Remote key present where the operation refuses to overwrite
    #[error("Object exists: {0}")]
    ObjectExists(String),

    /// Transport or service failure reported by the storage backend
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// User declined a confirmation prompt
    #[error("Aborted")]
    Aborted,

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_)
            | Error::Config(_)
            | Error::InvalidPattern(_)
            | Error::InvalidStyle(_)
            | Error::InvalidUrl(_) => 2, // UsageError
            Error::RemoteService(_) => 3, // NetworkError
            Error::Auth(_) => 4,          // AuthError
            Error::ProfileNotFound(_)
            | Error::LocalFileNotFound(_)
            | Error::RemoteObjectNotFound(_)
            | Error::BucketNotFound(_) => 5, // NotFound
            Error::ProfileExists(_) | Error::ObjectExists(_) | Error::LocalFileExists(_) => 6, // Conflict
            _ => 1, // GeneralError
        }
    }
}
