//! s3t-core: Core library for the s3t object storage task runner
//!
//! This crate provides the core functionality for s3t, including:
//! - Configuration and connection profile management
//! - Remote path handling
//! - ObjectStore trait for S3 operations
//! - Key filtering and listing styles
//! - Content identity checks between local files and remote objects
//! - The guarded tasks exposed on the command line
//!
//! This crate is independent of any specific S3 SDK so the tasks can be
//! tested against a mocked store.

pub mod config;
pub mod error;
pub mod identity;
pub mod listing;
pub mod path;
pub mod profile;
pub mod tasks;
pub mod traits;

pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use identity::{ObjectHandle, md5_file, normalize_etag};
pub use listing::{KeyFilter, ListStyle};
pub use path::{RemotePath, force_slashend};
pub use profile::{Profile, ProfileManager};
pub use traits::{BucketInfo, ListOptions, ListResult, LoggingStatus, ObjectInfo, ObjectStore};
