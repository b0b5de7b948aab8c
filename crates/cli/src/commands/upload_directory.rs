//! upload-directory command - Show the remote side of a directory upload
//!
//! Validates the local directory and lists the objects already present
//! under the remote directory. No files are transferred.

use std::path::PathBuf;

use clap::Args;
use s3t_core::{ObjectInfo, force_slashend, tasks};
use serde::Serialize;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List the objects under a remote directory for a local directory
#[derive(Args, Debug)]
pub struct UploadDirectoryArgs {
    /// Bucket name
    pub bucket: String,

    /// Local directory
    pub local_dir: PathBuf,

    /// Remote directory (a trailing slash is added if missing)
    pub remote_dir: String,
}

#[derive(Debug, Serialize)]
struct UploadDirectoryOutput {
    bucket: String,
    local_dir: String,
    remote_dir: String,
    existing: Vec<ObjectInfo>,
}

/// Execute the upload-directory command
pub async fn execute(args: UploadDirectoryArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let remote_dir = force_slashend(&args.remote_dir);
    let existing = match tasks::upload_directory(
        client.as_ref(),
        &args.bucket,
        &args.local_dir,
        &remote_dir,
    )
    .await
    {
        Ok(items) => items,
        Err(e) => return fail(&formatter, "Failed to inspect remote directory", e),
    };

    if formatter.is_json() {
        formatter.json(&UploadDirectoryOutput {
            bucket: args.bucket,
            local_dir: args.local_dir.display().to_string(),
            remote_dir,
            existing,
        });
    } else if existing.is_empty() {
        formatter.warning(&format!("No objects under {}/{remote_dir}", args.bucket));
    } else {
        for item in &existing {
            formatter.println(&item.key);
        }
    }

    ExitCode::Success
}
