//! Content identity between a local file and a remote object
//!
//! S3 reports the MD5 digest of a single-part object as its ETag. Comparing
//! that tag with the MD5 of a local file tells whether the two hold the same
//! bytes without downloading the object. This is a probabilistic check: two
//! different contents sharing a digest is astronomically unlikely, but it is
//! not a byte-for-byte comparison.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::{Error, Result};
use crate::path::RemotePath;
use crate::traits::ObjectStore;

const BUF_SIZE: usize = 64 * 1024;

/// A remote object together with its lazily fetched integrity tag
///
/// The tag is fetched with a metadata-only request the first time it is
/// needed and is never refreshed afterwards.
#[derive(Debug, Clone)]
pub struct ObjectHandle {
    path: RemotePath,
    etag: Option<String>,
}

impl ObjectHandle {
    /// Handle with no tag fetched yet
    pub fn new(path: RemotePath) -> Self {
        Self { path, etag: None }
    }

    /// Handle carrying a tag already obtained from a metadata fetch
    pub fn with_etag(path: RemotePath, etag: impl Into<String>) -> Self {
        Self {
            path,
            etag: Some(etag.into()),
        }
    }

    pub fn path(&self) -> &RemotePath {
        &self.path
    }

    /// The cached tag, if any
    pub fn cached_etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Return the integrity tag, issuing a HEAD request on first use
    pub async fn etag(&mut self, store: &dyn ObjectStore) -> Result<&str> {
        if self.etag.is_none() {
            tracing::debug!(path = %self.path, "fetching object metadata");
            let info = store.head_object(&self.path).await.map_err(|e| match e {
                Error::RemoteObjectNotFound(_) | Error::BucketNotFound(_) => {
                    Error::RemoteObjectNotFound(self.path.to_string())
                }
                other => other,
            })?;
            let etag = info.etag.ok_or_else(|| {
                Error::RemoteService(format!("no ETag returned for {}", self.path))
            })?;
            self.etag = Some(etag);
        }

        Ok(self.etag.as_deref().unwrap_or_default())
    }

    /// Whether `local` very probably holds the same bytes as the remote object
    pub async fn matches(&mut self, store: &dyn ObjectStore, local: &Path) -> Result<bool> {
        let remote = normalize_etag(self.etag(store).await?);

        if is_multipart_etag(&remote) {
            tracing::warn!(
                path = %self.path,
                etag = %remote,
                "multipart ETag is not a content digest, treating as different"
            );
            return Ok(false);
        }

        let local_digest = md5_file(local)?;
        tracing::debug!(path = %self.path, remote = %remote, local = %local_digest, "comparing digests");

        Ok(normalize_etag(&local_digest) == remote)
    }
}

/// Compute the MD5 of a file as lowercase hex, reading it in fixed-size chunks
pub fn md5_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|_| Error::LocalFileNotFound(path.to_path_buf()))?;
    if !file.metadata()?.is_file() {
        return Err(Error::LocalFileNotFound(path.to_path_buf()));
    }
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Strip quoting and whitespace around a tag and lowercase it
pub fn normalize_etag(tag: &str) -> String {
    tag.trim().trim_matches('"').trim().to_ascii_lowercase()
}

fn is_multipart_etag(tag: &str) -> bool {
    tag.split_once('-')
        .is_some_and(|(digest, parts)| !digest.is_empty() && parts.chars().all(|c| c.is_ascii_digit()))
}
