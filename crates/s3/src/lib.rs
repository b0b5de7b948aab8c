//! s3t-s3: S3 SDK adapter for the s3t task runner
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate, plus a pool handing out one client per
//! connection profile. It is the only crate that directly depends on
//! the AWS SDK.

pub mod client;
pub mod pool;

pub use client::S3Client;
pub use pool::ConnectionPool;
