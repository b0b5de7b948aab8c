//! create-object command - Create an object from a string

use clap::Args;
use s3t_core::{ObjectInfo, RemotePath, tasks};
use serde::Serialize;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create an object from a string
#[derive(Args, Debug)]
pub struct CreateObjectArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Data to store in the object
    pub contents: String,

    /// Replace the object if the key already exists
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Serialize)]
struct CreateObjectOutput {
    status: &'static str,
    bucket: String,
    object: ObjectInfo,
}

/// Execute the create-object command
pub async fn execute(args: CreateObjectArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let path = RemotePath::new(&args.bucket, &args.key);
    match tasks::create_object(client.as_ref(), &path, &args.contents, args.overwrite).await {
        Ok(info) => {
            if formatter.is_json() {
                formatter.json(&CreateObjectOutput {
                    status: "success",
                    bucket: args.bucket,
                    object: info,
                });
            } else {
                formatter.success(&format!(
                    "Created {path} ({})",
                    info.size_human.unwrap_or_default()
                ));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to create object", e),
    }
}
