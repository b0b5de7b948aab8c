//! delete-object command - Delete an object, asking first

use clap::Args;
use s3t_core::{RemotePath, tasks};
use serde::Serialize;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, confirm};

/// Delete an object
#[derive(Args, Debug)]
pub struct DeleteObjectArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Delete without asking for confirmation
    #[arg(long)]
    pub no_confirm: bool,
}

#[derive(Debug, Serialize)]
struct DeleteObjectOutput {
    status: &'static str,
    deleted: String,
}

/// Execute the delete-object command
pub async fn execute(args: DeleteObjectArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let path = RemotePath::new(&args.bucket, &args.key);
    match tasks::delete_object(client.as_ref(), &path, args.no_confirm, confirm).await {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&DeleteObjectOutput {
                    status: "success",
                    deleted: path.to_string(),
                });
            } else {
                formatter.success(&format!("Removed {path}"));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to delete object", e),
    }
}
