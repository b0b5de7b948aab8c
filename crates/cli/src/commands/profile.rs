//! Profile management commands
//!
//! Profiles are named connection settings. Each one serves the buckets
//! matching its pattern.

use clap::Subcommand;
use comfy_table::{Table, presets};
use s3t_core::{Profile, ProfileManager};
use serde::Serialize;

use super::fail;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Add or update a profile
    Set(SetArgs),

    /// List all configured profiles
    List,

    /// Remove a profile
    Remove(RemoveArgs),
}

/// Arguments for the `profile set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Profile name (e.g., "default", "logs", "minio")
    pub name: String,

    /// Shell-style pattern selecting the buckets this profile serves
    #[arg(long, default_value = "*")]
    pub bucket_pattern: String,

    /// S3-compatible endpoint URL; AWS is used when omitted
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Access key ID; the AWS credential chain is used when omitted
    #[arg(long, requires = "secret_key")]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long, requires = "access_key")]
    pub secret_key: Option<String>,

    /// AWS region
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Bucket lookup style: auto, path, or dns
    #[arg(long, default_value = "auto")]
    pub bucket_lookup: String,

    /// Fail instead of replacing an existing profile with this name
    #[arg(long)]
    pub no_replace: bool,
}

/// Arguments for the `profile remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the profile to remove
    pub name: String,
}

/// JSON output for profile list
#[derive(Serialize)]
struct ProfileListOutput {
    profiles: Vec<ProfileInfo>,
}

/// Profile information for output (without credentials)
#[derive(Serialize)]
struct ProfileInfo {
    name: String,
    bucket_pattern: String,
    endpoint: Option<String>,
    region: String,
    bucket_lookup: String,
    static_credentials: bool,
}

impl From<&Profile> for ProfileInfo {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            bucket_pattern: profile.bucket_pattern.clone(),
            endpoint: profile.endpoint.clone(),
            region: profile.region.clone(),
            bucket_lookup: profile.bucket_lookup.clone(),
            static_credentials: profile.static_credentials().is_some(),
        }
    }
}

/// JSON output for profile set/remove operations
#[derive(Serialize)]
struct ProfileOperationOutput {
    success: bool,
    profile: String,
    message: String,
}

/// Execute a profile subcommand
pub async fn execute(cmd: ProfileCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ProfileManager::new() {
        Ok(m) => m,
        Err(e) => return fail(&formatter, "Failed to load configuration", e),
    };

    match cmd {
        ProfileCommands::Set(args) => execute_set(args, &manager, &formatter),
        ProfileCommands::List => execute_list(&manager, &formatter),
        ProfileCommands::Remove(args) => execute_remove(args, &manager, &formatter),
    }
}

fn execute_set(args: SetArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    let name = args.name.clone();
    let no_replace = args.no_replace;
    let profile = profile_from_args(args);

    let saved = if no_replace {
        manager.add(profile)
    } else {
        manager.set(profile)
    };

    match saved {
        Ok(()) => {
            report_operation(formatter, &name, format!("Profile '{name}' configured"));
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to save profile", e),
    }
}

fn execute_list(manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    let profiles = match manager.list() {
        Ok(p) => p,
        Err(e) => return fail(formatter, "Failed to load profiles", e),
    };

    let infos: Vec<ProfileInfo> = profiles.iter().map(ProfileInfo::from).collect();

    if formatter.is_json() {
        formatter.json(&ProfileListOutput { profiles: infos });
    } else if infos.is_empty() {
        formatter.println("No profiles configured.");
    } else {
        formatter.println(&profile_table(&infos).to_string());
    }

    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &ProfileManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            report_operation(
                formatter,
                &args.name,
                format!("Profile '{}' removed", args.name),
            );
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to remove profile", e),
    }
}

fn profile_from_args(args: SetArgs) -> Profile {
    let mut profile = Profile::new(args.name);
    profile.bucket_pattern = args.bucket_pattern;
    profile.endpoint = args.endpoint;
    profile.access_key = args.access_key;
    profile.secret_key = args.secret_key;
    profile.region = args.region;
    profile.bucket_lookup = args.bucket_lookup;
    profile
}

fn report_operation(formatter: &Formatter, name: &str, message: String) {
    if formatter.is_json() {
        formatter.json(&ProfileOperationOutput {
            success: true,
            profile: name.to_string(),
            message,
        });
    } else {
        formatter.success(&message);
    }
}

fn profile_table(profiles: &[ProfileInfo]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["NAME", "BUCKETS", "ENDPOINT", "REGION", "LOOKUP", "CREDENTIALS"]);

    for p in profiles {
        table.add_row(vec![
            p.name.clone(),
            p.bucket_pattern.clone(),
            p.endpoint.clone().unwrap_or_else(|| "aws".to_string()),
            p.region.clone(),
            p.bucket_lookup.clone(),
            if p.static_credentials { "static" } else { "default chain" }.to_string(),
        ]);
    }

    table
}
