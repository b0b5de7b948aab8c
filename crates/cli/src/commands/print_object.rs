//! print-object command - Write an object's contents to stdout

use std::io::Write;

use clap::Args;
use s3t_core::{RemotePath, tasks};

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Print the contents of an object
#[derive(Args, Debug)]
pub struct PrintObjectArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,
}

/// Execute the print-object command
///
/// The body is written unchanged, followed by a newline, even in JSON mode.
pub async fn execute(args: PrintObjectArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let path = RemotePath::new(&args.bucket, &args.key);
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = tasks::print_object(client.as_ref(), &path, &mut stdout).await {
        return fail(&formatter, "Failed to read object", e);
    }

    if let Err(e) = writeln!(stdout) {
        return fail(&formatter, "Failed to write output", e.into());
    }

    ExitCode::Success
}
