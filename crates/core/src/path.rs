//! Remote object paths
//!
//! A remote path names a bucket and a key within it. Keys are path-like
//! strings; a key that is empty or ends with `/` has directory semantics.

/// A bucket/key pair pointing to an S3 location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    /// Bucket name
    pub bucket: String,
    /// Object key (empty for bucket root)
    pub key: String,
    /// Whether the key ends with a slash (directory semantics)
    pub is_dir: bool,
}

impl RemotePath {
    /// Create a new RemotePath
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        let is_dir = key.ends_with('/') || key.is_empty();
        Self {
            bucket: bucket.into(),
            key,
            is_dir,
        }
    }

    /// The same location with a trailing slash forced onto the key
    ///
    /// The bucket root stays the bucket root.
    pub fn as_dir(&self) -> Self {
        Self::new(&self.bucket, force_slashend(&self.key))
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}", self.bucket)
        } else {
            write!(f, "{}/{}", self.bucket, self.key)
        }
    }
}

/// Append a `/` unless the string is empty or already ends with one
pub fn force_slashend(key: &str) -> String {
    if key.is_empty() || key.ends_with('/') {
        key.to_string()
    } else {
        format!("{key}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_and_dir() {
        let file = RemotePath::new("bucket", "a/b.txt");
        assert!(!file.is_dir);

        let dir = RemotePath::new("bucket", "a/");
        assert!(dir.is_dir);

        let root = RemotePath::new("bucket", "");
        assert!(root.is_dir);
    }

    #[test]
    fn test_force_slashend() {
        assert_eq!(force_slashend("photos"), "photos/");
        assert_eq!(force_slashend("photos/"), "photos/");
        assert_eq!(force_slashend(""), "");
    }

    #[test]
    fn test_as_dir() {
        let path = RemotePath::new("bucket", "backups/2024").as_dir();
        assert_eq!(path.key, "backups/2024/");
        assert!(path.is_dir);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RemotePath::new("bucket", "key/file.txt").to_string(),
            "bucket/key/file.txt"
        );
        assert_eq!(RemotePath::new("bucket", "").to_string(), "bucket");
    }
}
