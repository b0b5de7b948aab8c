//! Guarded object storage tasks
//!
//! Each task is a direct delegation to an [`ObjectStore`], wrapped only with
//! the existence/overwrite guards and confirmation the command line promises.
//! Tasks return errors instead of terminating; the caller decides what a
//! failure means for the process.

use std::future::Future;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::identity::ObjectHandle;
use crate::listing::KeyFilter;
use crate::path::RemotePath;
use crate::traits::{BucketInfo, ListOptions, ObjectInfo, ObjectStore};

/// Keys requested per list call
const PAGE_SIZE: i32 = 1000;

/// Whether a key exists, using a metadata-only request
pub async fn object_exists(store: &dyn ObjectStore, path: &RemotePath) -> Result<bool> {
    match store.head_object(path).await {
        Ok(_) => Ok(true),
        Err(Error::RemoteObjectNotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// List every item under `path.key`, following continuation tokens
///
/// With a delimiter and `recursive == false`, common prefixes are returned as
/// directory entries. Items whose key does not pass `filter` are dropped.
pub async fn list_objects(
    store: &dyn ObjectStore,
    path: &RemotePath,
    filter: &KeyFilter,
    delimiter: Option<&str>,
    recursive: bool,
) -> Result<Vec<ObjectInfo>> {
    let mut items = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let options = ListOptions {
            max_keys: Some(PAGE_SIZE),
            delimiter: delimiter.map(str::to_string),
            continuation_token: continuation_token.take(),
            recursive,
        };

        let page = store.list_objects(path, options).await?;
        items.extend(page.items.into_iter().filter(|i| filter.matches(&i.key)));

        match page.continuation_token {
            Some(token) if page.truncated => continuation_token = Some(token),
            _ => break,
        }
    }

    tracing::debug!(path = %path, count = items.len(), "listed objects");
    Ok(items)
}

/// List all buckets with their location and logging configuration
pub async fn list_buckets(store: &dyn ObjectStore) -> Result<Vec<BucketInfo>> {
    let mut buckets = store.list_buckets().await?;
    for bucket in &mut buckets {
        bucket.location = store.bucket_location(&bucket.name).await?;
        bucket.logging = store.bucket_logging(&bucket.name).await?;
    }
    Ok(buckets)
}

/// Create or overwrite an object from a string
///
/// With `overwrite == false` an existing key is left untouched and
/// `ObjectExists` is returned.
pub async fn create_object(
    store: &dyn ObjectStore,
    path: &RemotePath,
    contents: &str,
    overwrite: bool,
) -> Result<ObjectInfo> {
    guard_remote(store, path, overwrite).await?;
    store
        .put_object(path, contents.as_bytes().to_vec(), None)
        .await
}

/// Upload a local file, guessing its content type from the extension
pub async fn upload_file(
    store: &dyn ObjectStore,
    path: &RemotePath,
    local: &Path,
    overwrite: bool,
) -> Result<ObjectInfo> {
    if !local.is_file() {
        return Err(Error::LocalFileNotFound(local.to_path_buf()));
    }
    guard_remote(store, path, overwrite).await?;

    let content_type = mime_guess::from_path(local)
        .first()
        .map(|m| m.essence_str().to_string());
    store.put_object_from_file(path, local, content_type).await
}

/// Write the raw body of an object to `out`
pub async fn print_object<W: Write>(
    store: &dyn ObjectStore,
    path: &RemotePath,
    out: &mut W,
) -> Result<usize> {
    let data = store.get_object(path).await?;
    out.write_all(&data)?;
    out.flush()?;
    Ok(data.len())
}

/// Download an object into a local file
///
/// With `overwrite == false` an existing local path is refused before any
/// request is made, so the file is never touched.
pub async fn download_object(
    store: &dyn ObjectStore,
    path: &RemotePath,
    local: &Path,
    overwrite: bool,
) -> Result<u64> {
    if local.exists() && !overwrite {
        return Err(Error::LocalFileExists(local.to_path_buf()));
    }

    if let Some(parent) = local.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    store.get_object_to_file(path, local).await
}

/// Delete an object, asking `confirm` first unless `no_confirm` is set
///
/// `confirm` receives the question and resolves to the answer. A declined
/// or failed confirmation deletes nothing; declining returns `Aborted`.
pub async fn delete_object<F, Fut>(
    store: &dyn ObjectStore,
    path: &RemotePath,
    no_confirm: bool,
    confirm: F,
) -> Result<()>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    if !no_confirm && !confirm(format!("Remove {}?", path.key)).await? {
        return Err(Error::Aborted);
    }
    store.delete_object(path).await
}

/// Whether `local` very probably has the same contents as the object
pub async fn compare_identity(
    store: &dyn ObjectStore,
    path: &RemotePath,
    local: &Path,
) -> Result<bool> {
    ObjectHandle::new(path.clone()).matches(store, local).await
}

/// List the objects already present under `remote_dir`
///
/// `local_dir` must be an existing directory. Nothing is uploaded.
pub async fn upload_directory(
    store: &dyn ObjectStore,
    bucket: &str,
    local_dir: &Path,
    remote_dir: &str,
) -> Result<Vec<ObjectInfo>> {
    if !local_dir.is_dir() {
        return Err(Error::LocalFileNotFound(local_dir.to_path_buf()));
    }

    let prefix = RemotePath::new(bucket, remote_dir).as_dir();
    list_objects(store, &prefix, &KeyFilter::all(), None, true).await
}

async fn guard_remote(store: &dyn ObjectStore, path: &RemotePath, overwrite: bool) -> Result<()> {
    if !overwrite && object_exists(store, path).await? {
        return Err(Error::ObjectExists(path.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ListResult, LoggingStatus, MockObjectStore};
    use std::io::Write as _;
    use tempfile::TempDir;

    fn missing(path: &RemotePath) -> Error {
        Error::RemoteObjectNotFound(path.to_string())
    }

    #[tokio::test]
    async fn test_object_exists() {
        let mut store = MockObjectStore::new();
        store
            .expect_head_object()
            .returning(|p| match p.key.as_str() {
                "here" => Ok(ObjectInfo::file("here", 1)),
                "down" => Err(Error::RemoteService("503".into())),
                _ => Err(missing(p)),
            });

        assert!(object_exists(&store, &RemotePath::new("b", "here")).await.unwrap());
        assert!(!object_exists(&store, &RemotePath::new("b", "gone")).await.unwrap());
        assert!(object_exists(&store, &RemotePath::new("b", "down")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_objects_paginates_and_filters() {
        let mut store = MockObjectStore::new();
        store.expect_list_objects().times(2).returning(|_, opts| {
            if opts.continuation_token.is_none() {
                Ok(ListResult {
                    items: vec![ObjectInfo::file("a.jpg", 1), ObjectInfo::file("b.txt", 2)],
                    truncated: true,
                    continuation_token: Some("next".into()),
                })
            } else {
                assert_eq!(opts.continuation_token.as_deref(), Some("next"));
                Ok(ListResult {
                    items: vec![ObjectInfo::file("c.jpg", 3)],
                    truncated: false,
                    continuation_token: None,
                })
            }
        });

        let filter = KeyFilter::new(None, Some("*.jpg")).unwrap();
        let items = list_objects(&store, &RemotePath::new("b", ""), &filter, Some("/"), false)
            .await
            .unwrap();
        let keys: Vec<_> = items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["a.jpg", "c.jpg"]);
    }

    #[tokio::test]
    async fn test_list_objects_passes_delimiter() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .withf(|path, opts| {
                path.key == "photos/"
                    && opts.delimiter.as_deref() == Some("/")
                    && opts.max_keys == Some(PAGE_SIZE)
                    && !opts.recursive
            })
            .times(1)
            .returning(|_, _| Ok(ListResult::default()));

        let items = list_objects(
            &store,
            &RemotePath::new("b", "photos/"),
            &KeyFilter::all(),
            Some("/"),
            false,
        )
        .await
        .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_buckets_fills_location_and_logging() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_buckets()
            .returning(|| Ok(vec![BucketInfo::new("media")]));
        store
            .expect_bucket_location()
            .returning(|_| Ok(Some("eu-west-1".into())));
        store.expect_bucket_logging().returning(|_| {
            Ok(LoggingStatus {
                target_bucket: Some("logs".into()),
                target_prefix: Some("media/".into()),
                grants: vec![],
            })
        });

        let buckets = list_buckets(&store).await.unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].location.as_deref(), Some("eu-west-1"));
        assert!(buckets[0].logging.enabled());
    }

    #[tokio::test]
    async fn test_create_object_refuses_existing_key() {
        let mut store = MockObjectStore::new();
        store
            .expect_head_object()
            .returning(|p| Ok(ObjectInfo::file(&p.key, 3)));
        store.expect_put_object().never();

        let path = RemotePath::new("b", "notes.txt");
        let err = create_object(&store, &path, "new", false).await.unwrap_err();
        assert!(matches!(err, Error::ObjectExists(p) if p == "b/notes.txt"));
    }

    #[tokio::test]
    async fn test_create_object_overwrite_skips_check() {
        let mut store = MockObjectStore::new();
        store.expect_head_object().never();
        store
            .expect_put_object()
            .withf(|_, data, ct| data.as_slice() == b"new" && ct.is_none())
            .times(1)
            .returning(|p, data, _| Ok(ObjectInfo::file(&p.key, data.len() as i64)));

        let path = RemotePath::new("b", "notes.txt");
        let info = create_object(&store, &path, "new", true).await.unwrap();
        assert_eq!(info.size_bytes, Some(3));
    }

    #[tokio::test]
    async fn test_create_object_new_key() {
        let mut store = MockObjectStore::new();
        store.expect_head_object().returning(|p| Err(missing(p)));
        store
            .expect_put_object()
            .times(1)
            .returning(|p, data, _| Ok(ObjectInfo::file(&p.key, data.len() as i64)));

        let path = RemotePath::new("b", "fresh.txt");
        assert!(create_object(&store, &path, "hello", false).await.is_ok());
    }

    #[tokio::test]
    async fn test_upload_file_missing_local() {
        let store = MockObjectStore::new();
        let path = RemotePath::new("b", "k");
        let err = upload_file(&store, &path, Path::new("/nonexistent/s3t/up"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LocalFileNotFound(_)));
    }

    #[tokio::test]
    async fn test_upload_file_guesses_content_type() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("page.html");
        std::fs::write(&local, "<p>hi</p>").unwrap();

        let mut store = MockObjectStore::new();
        store.expect_head_object().returning(|p| Err(missing(p)));
        store
            .expect_put_object_from_file()
            .withf(|_, _, ct| ct.as_deref() == Some("text/html"))
            .times(1)
            .returning(|p, _, _| Ok(ObjectInfo::file(&p.key, 9)));

        let path = RemotePath::new("b", "site/page.html");
        upload_file(&store, &path, &local, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_file_refuses_existing_key() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("data.bin");
        std::fs::write(&local, [0u8; 4]).unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_head_object()
            .returning(|p| Ok(ObjectInfo::file(&p.key, 4)));
        store.expect_put_object_from_file().never();

        let path = RemotePath::new("b", "data.bin");
        let err = upload_file(&store, &path, &local, false).await.unwrap_err();
        assert!(matches!(err, Error::ObjectExists(_)));
    }

    #[tokio::test]
    async fn test_print_object_writes_raw_bytes() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .returning(|_| Ok(vec![0xff, b'a', b'\n']));

        let mut out = Vec::new();
        let n = print_object(&store, &RemotePath::new("b", "k"), &mut out)
            .await
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(out, [0xff, b'a', b'\n']);
    }

    #[tokio::test]
    async fn test_download_refuses_existing_local_file() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("report.csv");
        let mut f = std::fs::File::create(&local).unwrap();
        f.write_all(b"original").unwrap();
        drop(f);

        let mut store = MockObjectStore::new();
        store.expect_get_object_to_file().never();

        let err = download_object(&store, &RemotePath::new("b", "report.csv"), &local, false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LocalFileExists(_)));
        assert_eq!(std::fs::read(&local).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_download_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("nested/deeper/out.txt");

        let mut store = MockObjectStore::new();
        store
            .expect_get_object_to_file()
            .times(1)
            .returning(|_, local| {
                std::fs::write(local, b"data").unwrap();
                Ok(4)
            });

        let written = download_object(&store, &RemotePath::new("b", "out.txt"), &local, false)
            .await
            .unwrap();
        assert_eq!(written, 4);
        assert!(local.exists());
    }

    #[tokio::test]
    async fn test_download_overwrite_existing() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("out.txt");
        std::fs::write(&local, b"old").unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_get_object_to_file()
            .times(1)
            .returning(|_, _| Ok(3));

        assert!(
            download_object(&store, &RemotePath::new("b", "out.txt"), &local, true)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let mut store = MockObjectStore::new();
        store.expect_delete_object().never();

        let mut asked = String::new();
        let err = delete_object(&store, &RemotePath::new("b", "old.log"), false, |q| {
            asked = q;
            std::future::ready(Ok(false))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Aborted));
        assert_eq!(asked, "Remove old.log?");
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let mut store = MockObjectStore::new();
        store.expect_delete_object().times(1).returning(|_| Ok(()));

        delete_object(&store, &RemotePath::new("b", "old.log"), false, |_| {
            std::future::ready(Ok(true))
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_delete_interrupted_prompt_deletes_nothing() {
        let mut store = MockObjectStore::new();
        store.expect_delete_object().never();

        let err = delete_object(&store, &RemotePath::new("b", "old.log"), false, |_| {
            std::future::ready(Err(Error::Aborted))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Aborted));
    }

    #[tokio::test]
    async fn test_delete_no_confirm_skips_prompt() {
        let mut store = MockObjectStore::new();
        store.expect_delete_object().times(1).returning(|_| Ok(()));

        delete_object(&store, &RemotePath::new("b", "old.log"), true, |_| {
            std::future::ready(Err(Error::General("prompt shown".into())))
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_compare_identity_hello() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("hello.txt");
        std::fs::write(&local, b"hello").unwrap();

        let mut store = MockObjectStore::new();
        store.expect_head_object().times(1).returning(|p| {
            let mut info = ObjectInfo::file(&p.key, 5);
            info.etag = Some("5d41402abc4b2a76b9719d911017c592".into());
            Ok(info)
        });

        let same = compare_identity(&store, &RemotePath::new("b", "hello.txt"), &local)
            .await
            .unwrap();
        assert!(same);
    }

    #[tokio::test]
    async fn test_upload_directory_lists_remote_prefix() {
        let dir = TempDir::new().unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .withf(|path, opts| path.key == "site/" && opts.recursive)
            .times(1)
            .returning(|_, _| {
                Ok(ListResult {
                    items: vec![ObjectInfo::file("site/index.html", 10)],
                    truncated: false,
                    continuation_token: None,
                })
            });
        store.expect_put_object_from_file().never();

        let items = upload_directory(&store, "b", dir.path(), "site").await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_directory_requires_local_dir() {
        let store = MockObjectStore::new();
        let err = upload_directory(&store, "b", Path::new("/nonexistent/s3t/dir"), "site")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LocalFileNotFound(_)));
    }
}
