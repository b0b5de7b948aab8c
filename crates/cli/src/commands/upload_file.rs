//! upload-file command - Upload a local file as an object

use std::path::PathBuf;

use clap::Args;
use s3t_core::{ObjectInfo, RemotePath, tasks};
use serde::Serialize;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Upload a local file as an object
#[derive(Args, Debug)]
pub struct UploadFileArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Local file to upload
    pub local_path: PathBuf,

    /// Replace the object if the key already exists
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Serialize)]
struct UploadFileOutput {
    status: &'static str,
    bucket: String,
    source: String,
    object: ObjectInfo,
}

/// Execute the upload-file command
pub async fn execute(args: UploadFileArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let path = RemotePath::new(&args.bucket, &args.key);
    let spinner = ProgressBar::spinner(
        formatter.config(),
        &format!("Uploading {} to {path}", args.local_path.display()),
    );
    let result =
        tasks::upload_file(client.as_ref(), &path, &args.local_path, args.overwrite).await;
    spinner.finish_and_clear();

    match result {
        Ok(info) => {
            if formatter.is_json() {
                formatter.json(&UploadFileOutput {
                    status: "success",
                    bucket: args.bucket,
                    source: args.local_path.display().to_string(),
                    object: info,
                });
            } else {
                formatter.success(&format!(
                    "{} -> {path} ({})",
                    args.local_path.display(),
                    info.size_human.unwrap_or_default()
                ));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to upload file", e),
    }
}
