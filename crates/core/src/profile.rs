//! Connection profiles
//!
//! A profile is a named connection configuration for an S3-compatible
//! endpoint. Each profile carries a shell-style bucket pattern; the first
//! profile whose pattern matches a bucket name is used to reach that bucket.

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::error::{Error, Result};

/// Name of the fallback profile used when no pattern matches
pub const DEFAULT_PROFILE: &str = "default";

/// A named S3-compatible connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique name for this profile
    pub name: String,

    /// Shell-style pattern selecting the buckets served by this profile
    #[serde(default = "default_bucket_pattern")]
    pub bucket_pattern: String,

    /// Endpoint URL; the AWS endpoint for the region is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Access key ID; the default credential chain is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Secret access key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Bucket lookup style: "auto", "path", or "dns"
    #[serde(default = "default_bucket_lookup")]
    pub bucket_lookup: String,
}

fn default_bucket_pattern() -> String {
    "*".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket_lookup() -> String {
    "auto".to_string()
}

impl Profile {
    /// Create a profile matching every bucket, using the default credential chain
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bucket_pattern: default_bucket_pattern(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            region: default_region(),
            bucket_lookup: default_bucket_lookup(),
        }
    }

    /// Whether this profile serves the given bucket
    pub fn matches_bucket(&self, bucket: &str) -> bool {
        glob::Pattern::new(&self.bucket_pattern)
            .map(|p| p.matches(bucket))
            .unwrap_or(false)
    }

    /// Static credentials, if both halves are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(access), Some(secret)) => Some((access, secret)),
            _ => None,
        }
    }

    /// Check field values before the profile is stored
    pub fn validate(&self) -> Result<()> {
        if !is_valid_profile_name(&self.name) {
            return Err(Error::Config(format!(
                "Invalid profile name '{}': use letters, digits, '_' or '-'",
                self.name
            )));
        }

        glob::Pattern::new(&self.bucket_pattern)?;

        if let Some(endpoint) = &self.endpoint {
            url::Url::parse(endpoint)?;
        }

        if !matches!(self.bucket_lookup.as_str(), "auto" | "path" | "dns") {
            return Err(Error::Config(
                "Bucket lookup must be 'auto', 'path', or 'dns'".into(),
            ));
        }

        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(Error::Config(
                "Access key and secret key must be given together".into(),
            ));
        }

        Ok(())
    }
}

/// Pick the profile serving `bucket`
///
/// Profiles are tried in configuration order; the profile named `default`
/// is the fallback when no pattern matches.
pub fn resolve<'a>(profiles: &'a [Profile], bucket: &str) -> Result<&'a Profile> {
    profiles
        .iter()
        .find(|p| p.matches_bucket(bucket))
        .or_else(|| profiles.iter().find(|p| p.name == DEFAULT_PROFILE))
        .ok_or_else(|| Error::ProfileNotFound(format!("no profile matches bucket '{bucket}'")))
}

/// Manager for profile operations
pub struct ProfileManager {
    config_manager: ConfigManager,
}

impl ProfileManager {
    /// Create a new ProfileManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new ProfileManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all configured profiles
    pub fn list(&self) -> Result<Vec<Profile>> {
        let config = self.config_manager.load()?;
        Ok(config.profiles)
    }

    /// Add or replace a profile, keeping its position when it already exists
    pub fn set(&self, profile: Profile) -> Result<()> {
        profile.validate()?;
        let mut config = self.config_manager.load()?;

        match config.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => config.profiles.push(profile),
        }

        self.config_manager.save(&config)
    }

    /// Add a profile, failing if one with the same name exists
    pub fn add(&self, profile: Profile) -> Result<()> {
        if self.exists(&profile.name)? {
            return Err(Error::ProfileExists(profile.name));
        }
        self.set(profile)
    }

    /// Remove a profile
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.profiles.len();

        config.profiles.retain(|p| p.name != name);

        if config.profiles.len() == original_len {
            return Err(Error::ProfileNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }

    /// Check if a profile exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        let config = self.config_manager.load()?;
        Ok(config.profiles.iter().any(|p| p.name == name))
    }
}

fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
