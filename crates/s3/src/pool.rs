//! Connection pool keyed by profile
//!
//! Buckets are mapped to profiles by pattern, and one client is built per
//! profile on first use. Later requests for any bucket served by the same
//! profile share that client.

use std::collections::HashMap;
use std::sync::Arc;

use s3t_core::profile::{self, DEFAULT_PROFILE};
use s3t_core::{Profile, ProfileManager, Result};

use crate::client::S3Client;

/// Lazily built S3 clients, one per profile name
pub struct ConnectionPool {
    profiles: Vec<Profile>,
    clients: HashMap<String, Arc<S3Client>>,
}

impl ConnectionPool {
    /// Create a pool over an explicit set of profiles
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            clients: HashMap::new(),
        }
    }

    /// Create a pool over the configured profiles
    pub fn from_manager(manager: &ProfileManager) -> Result<Self> {
        Ok(Self::new(manager.list()?))
    }

    /// Create a pool over the profiles in the default config location
    pub fn load() -> Result<Self> {
        Self::from_manager(&ProfileManager::new()?)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Client serving `bucket`
    pub async fn client_for_bucket(&mut self, bucket: &str) -> Result<Arc<S3Client>> {
        let profile = if self.profiles.is_empty() {
            Profile::new(DEFAULT_PROFILE)
        } else {
            profile::resolve(&self.profiles, bucket)?.clone()
        };
        tracing::debug!(bucket, profile = %profile.name, "resolved profile");
        self.client_for_profile(profile).await
    }

    /// Client for requests not tied to a bucket, such as listing buckets
    ///
    /// Uses the `default` profile, then the first configured one. With no
    /// profiles at all, the AWS default credential chain is used.
    pub async fn client_default(&mut self) -> Result<Arc<S3Client>> {
        let profile = self
            .profiles
            .iter()
            .find(|p| p.name == DEFAULT_PROFILE)
            .or_else(|| self.profiles.first())
            .cloned()
            .unwrap_or_else(|| Profile::new(DEFAULT_PROFILE));
        self.client_for_profile(profile).await
    }

    async fn client_for_profile(&mut self, profile: Profile) -> Result<Arc<S3Client>> {
        if let Some(client) = self.clients.get(&profile.name) {
            return Ok(Arc::clone(client));
        }

        let name = profile.name.clone();
        let client = Arc::new(S3Client::new(profile).await?);
        self.clients.insert(name, Arc::clone(&client));
        Ok(client)
    }
}
