//! CLI command definitions and execution
//!
//! One subcommand per task. Each command resolves a client from the
//! connection pool, runs the task from s3t-core, and turns the result into
//! output plus an exit code.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use s3t_core::{Config, ConfigManager};
use s3t_s3::{ConnectionPool, S3Client};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod compare_identity;
mod completions;
mod create_object;
mod delete_object;
mod download_object;
mod list_buckets;
mod list_objects;
mod print_object;
mod profile;
mod upload_directory;
mod upload_file;

/// s3t - S3 object storage tasks
///
/// Small guarded tasks against S3 and S3-compatible services: listing,
/// uploading, downloading, deleting, and checking whether a local file
/// holds the same bytes as a remote object.
#[derive(Parser, Debug)]
#[command(name = "s3t")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinners
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List objects in a bucket
    ListObjects(list_objects::ListObjectsArgs),

    /// List buckets with their location and logging status
    ListBuckets,

    /// Create an object from a string
    CreateObject(create_object::CreateObjectArgs),

    /// Upload a local file as an object
    UploadFile(upload_file::UploadFileArgs),

    /// Print the contents of an object
    PrintObject(print_object::PrintObjectArgs),

    /// Download an object to a local file
    DownloadObject(download_object::DownloadObjectArgs),

    /// Delete an object
    DeleteObject(delete_object::DeleteObjectArgs),

    /// Check whether a local file has the same contents as an object
    CompareIdentity(compare_identity::CompareIdentityArgs),

    /// List the objects under a remote directory for a local directory
    UploadDirectory(upload_directory::UploadDirectoryArgs),

    /// Manage connection profiles
    #[command(subcommand)]
    Profile(profile::ProfileCommands),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let config = load_config();
    let output_config = OutputConfig::from_flags(&cli, &config);

    match cli.command {
        Commands::ListObjects(args) => {
            list_objects::execute(args, &config.defaults.delimiter, output_config).await
        }
        Commands::ListBuckets => list_buckets::execute(output_config).await,
        Commands::CreateObject(args) => create_object::execute(args, output_config).await,
        Commands::UploadFile(args) => upload_file::execute(args, output_config).await,
        Commands::PrintObject(args) => print_object::execute(args, output_config).await,
        Commands::DownloadObject(args) => download_object::execute(args, output_config).await,
        Commands::DeleteObject(args) => delete_object::execute(args, output_config).await,
        Commands::CompareIdentity(args) => compare_identity::execute(args, output_config).await,
        Commands::UploadDirectory(args) => upload_directory::execute(args, output_config).await,
        Commands::Profile(cmd) => profile::execute(cmd, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Config file contents, or the built-in defaults if it cannot be read
///
/// Commands that need the file itself (profiles) report load errors on
/// their own.
fn load_config() -> Config {
    match ConfigManager::new().and_then(|m| m.load()) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "using default configuration");
            Config::default()
        }
    }
}

/// Client for the profile serving `bucket`
pub(crate) async fn connect(bucket: &str) -> s3t_core::Result<Arc<S3Client>> {
    let mut pool = ConnectionPool::load()?;
    pool.client_for_bucket(bucket).await
}

/// Client for bucket-independent requests
pub(crate) async fn connect_default() -> s3t_core::Result<Arc<S3Client>> {
    let mut pool = ConnectionPool::load()?;
    pool.client_default().await
}

/// Print `err` with some context and map it to an exit code
pub(crate) fn fail(formatter: &Formatter, context: &str, err: s3t_core::Error) -> ExitCode {
    formatter.error(&format!("{context}: {err}"));
    ExitCode::from(&err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_objects() {
        let cli = Cli::try_parse_from([
            "s3t",
            "list-objects",
            "photos",
            "--prefix",
            "2024/",
            "--search",
            "beach",
            "--style",
            "nameonly",
            "-r",
        ])
        .unwrap();

        match cli.command {
            Commands::ListObjects(args) => {
                assert_eq!(args.bucket, "photos");
                assert_eq!(args.prefix, "2024/");
                assert_eq!(args.search.as_deref(), Some("beach"));
                assert_eq!(args.style, "nameonly");
                assert!(args.recursive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["s3t", "list-buckets", "--json", "--debug"]).unwrap();
        assert!(cli.json);
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::ListBuckets));
    }

    #[test]
    fn test_parse_guard_flags_default_off() {
        let cli = Cli::try_parse_from(["s3t", "create-object", "b", "k", "hello"]).unwrap();
        match cli.command {
            Commands::CreateObject(args) => assert!(!args.overwrite),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["s3t", "delete-object", "b", "k"]).unwrap();
        match cli.command {
            Commands::DeleteObject(args) => assert!(!args.no_confirm),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(["s3t", "compare-identity", "bucket", "key"]).is_err());
    }

    #[test]
    fn test_fail_maps_exit_codes() {
        let formatter = Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        });

        let code = fail(
            &formatter,
            "Failed",
            s3t_core::Error::ObjectExists("b/k".into()),
        );
        assert_eq!(code, ExitCode::Conflict);

        let code = fail(&formatter, "Failed", s3t_core::Error::Aborted);
        assert_eq!(code, ExitCode::GeneralError);

        let code = fail(
            &formatter,
            "Failed",
            s3t_core::Error::RemoteObjectNotFound("b/k".into()),
        );
        assert_eq!(code, ExitCode::NotFound);
    }
}
