//! download-object command - Download an object into a local file

use std::path::PathBuf;

use clap::Args;
use s3t_core::{RemotePath, tasks};
use serde::Serialize;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Download an object to a local file
#[derive(Args, Debug)]
pub struct DownloadObjectArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Local file to write
    pub local_path: PathBuf,

    /// Replace the local file if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Serialize)]
struct DownloadObjectOutput {
    status: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
    size_human: String,
}

/// Execute the download-object command
pub async fn execute(args: DownloadObjectArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let path = RemotePath::new(&args.bucket, &args.key);
    let spinner = ProgressBar::spinner(
        formatter.config(),
        &format!("Downloading {path} to {}", args.local_path.display()),
    );
    let result =
        tasks::download_object(client.as_ref(), &path, &args.local_path, args.overwrite).await;
    spinner.finish_and_clear();

    match result {
        Ok(size) => {
            let size_human = humansize::format_size(size, humansize::BINARY);
            if formatter.is_json() {
                formatter.json(&DownloadObjectOutput {
                    status: "success",
                    source: path.to_string(),
                    target: args.local_path.display().to_string(),
                    size_bytes: size,
                    size_human,
                });
            } else {
                formatter.success(&format!(
                    "{path} -> {} ({size_human})",
                    args.local_path.display()
                ));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to download object", e),
    }
}
