//! compare-identity command - Check a local file against a remote object
//!
//! The check compares the MD5 of the local file with the object's ETag,
//! so no object data is downloaded.

use std::path::PathBuf;

use clap::Args;
use s3t_core::{RemotePath, tasks};
use serde::Serialize;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Check whether a local file has the same contents as an object
#[derive(Args, Debug)]
pub struct CompareIdentityArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Local file to compare
    pub local_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct CompareIdentityOutput {
    remote: String,
    local: String,
    identical: bool,
}

/// Execute the compare-identity command
///
/// Prints `True` or `False`. A difference is not an error.
pub async fn execute(args: CompareIdentityArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let path = RemotePath::new(&args.bucket, &args.key);
    match tasks::compare_identity(client.as_ref(), &path, &args.local_path).await {
        Ok(identical) => {
            if formatter.is_json() {
                formatter.json(&CompareIdentityOutput {
                    remote: path.to_string(),
                    local: args.local_path.display().to_string(),
                    identical,
                });
            } else {
                formatter.println(verdict(identical));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, "Failed to compare", e),
    }
}

fn verdict(identical: bool) -> &'static str {
    if identical { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict() {
        assert_eq!(verdict(true), "True");
        assert_eq!(verdict(false), "False");
    }
}
