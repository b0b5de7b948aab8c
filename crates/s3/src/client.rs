//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3t-core.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use s3t_core::{
    BucketInfo, Error, ListOptions, ListResult, LoggingStatus, ObjectInfo, ObjectStore, Profile,
    RemotePath, Result,
};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    profile: Profile,
}

impl S3Client {
    /// Create a new S3 client from a connection profile
    ///
    /// Profiles without static credentials use the AWS default credential
    /// chain (environment, shared config files, instance metadata).
    pub async fn new(profile: Profile) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(profile.region.clone()));

        if let Some((access_key, secret_key)) = profile.static_credentials() {
            let credentials = aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None, // session token
                None, // expiry
                "s3t-static-credentials",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &profile.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        // Custom endpoints are usually S3-compatible servers without virtual hosting
        let force_path_style = match profile.bucket_lookup.as_str() {
            "path" => true,
            "dns" => false,
            _ => profile.endpoint.is_some(),
        };

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(force_path_style)
            .build();

        tracing::debug!(
            profile = %profile.name,
            endpoint = profile.endpoint.as_deref().unwrap_or("aws"),
            force_path_style,
            "created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            profile,
        })
    }

    /// The profile this client was built from
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        tracing::debug!("list_buckets");
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "", || Error::General("bucket listing failed".into())))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| {
                let mut info = BucketInfo::new(b.name().unwrap_or_default());
                info.created = b.creation_date().and_then(to_timestamp);
                info
            })
            .collect();

        Ok(buckets)
    }

    async fn bucket_location(&self, bucket: &str) -> Result<Option<String>> {
        tracing::debug!(bucket, "get_bucket_location");
        let response = self
            .inner
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, || Error::BucketNotFound(bucket.to_string())))?;

        // An empty constraint is the classic us-east-1 region
        let location = match response.location_constraint().map(|c| c.as_str()) {
            None | Some("") => "us-east-1".to_string(),
            Some(region) => region.to_string(),
        };

        Ok(Some(location))
    }

    async fn bucket_logging(&self, bucket: &str) -> Result<LoggingStatus> {
        tracing::debug!(bucket, "get_bucket_logging");
        let response = self
            .inner
            .get_bucket_logging()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, || Error::BucketNotFound(bucket.to_string())))?;

        let Some(enabled) = response.logging_enabled() else {
            return Ok(LoggingStatus::default());
        };

        let grants = enabled
            .target_grants()
            .iter()
            .map(|grant| {
                let grantee = grant
                    .grantee()
                    .and_then(|g| {
                        g.display_name()
                            .or(g.email_address())
                            .or(g.id())
                            .or(g.uri())
                    })
                    .unwrap_or("unknown");
                let permission = grant.permission().map(|p| p.as_str()).unwrap_or("UNKNOWN");
                format!("{grantee}:{permission}")
            })
            .collect();

        Ok(LoggingStatus {
            target_bucket: Some(enabled.target_bucket().to_string()),
            target_prefix: Some(enabled.target_prefix().to_string()),
            grants,
        })
    }

    async fn list_objects(&self, path: &RemotePath, options: ListOptions) -> Result<ListResult> {
        tracing::debug!(path = %path, ?options, "list_objects_v2");
        let mut request = self.inner.list_objects_v2().bucket(&path.bucket);

        if !path.key.is_empty() {
            request = request.prefix(&path.key);
        }

        if !options.recursive {
            if let Some(delimiter) = options.delimiter.as_deref().filter(|d| !d.is_empty()) {
                request = request.delimiter(delimiter);
            }
        }

        if let Some(max) = options.max_keys {
            request = request.max_keys(max);
        }

        if let Some(token) = &options.continuation_token {
            request = request.continuation_token(token);
        }

        let bucket = path.bucket.as_str();
        let response = request
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, || Error::BucketNotFound(bucket.to_string())))?;

        let mut items = Vec::new();

        for prefix in response.common_prefixes() {
            if let Some(p) = prefix.prefix() {
                items.push(ObjectInfo::dir(p));
            }
        }

        for object in response.contents() {
            let key = object.key().unwrap_or_default();
            let mut info = ObjectInfo::file(key, object.size().unwrap_or(0));
            info.last_modified = object.last_modified().and_then(to_timestamp);
            info.etag = object.e_tag().map(strip_quotes);
            info.storage_class = object.storage_class().map(|sc| sc.as_str().to_string());
            items.push(info);
        }

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
            continuation_token: response.next_continuation_token().map(|s| s.to_string()),
        })
    }

    async fn head_object(&self, path: &RemotePath) -> Result<ObjectInfo> {
        tracing::debug!(path = %path, "head_object");
        let response = self
            .inner
            .head_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    Error::RemoteObjectNotFound(path.to_string())
                } else {
                    map_sdk_error(e, &path.bucket, || {
                        Error::RemoteObjectNotFound(path.to_string())
                    })
                }
            })?;

        let mut info = ObjectInfo::file(&path.key, response.content_length().unwrap_or(0));
        info.last_modified = response.last_modified().and_then(to_timestamp);
        info.etag = response.e_tag().map(strip_quotes);
        info.content_type = response.content_type().map(|ct| ct.to_string());
        info.storage_class = response.storage_class().map(|sc| sc.as_str().to_string());

        Ok(info)
    }

    async fn get_object(&self, path: &RemotePath) -> Result<Vec<u8>> {
        tracing::debug!(path = %path, "get_object");
        let response = self.send_get_object(path).await?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::RemoteService(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn get_object_to_file(&self, path: &RemotePath, local: &Path) -> Result<u64> {
        tracing::debug!(path = %path, local = %local.display(), "get_object to file");
        let response = self.send_get_object(path).await?;

        let mut body = response.body.into_async_read();
        write_replacing(&mut body, local).await
    }

    async fn put_object(
        &self,
        path: &RemotePath,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        tracing::debug!(path = %path, size = data.len(), "put_object");
        let size = data.len() as i64;
        self.send_put_object(path, ByteStream::from(data), size, content_type)
            .await
    }

    async fn put_object_from_file(
        &self,
        path: &RemotePath,
        local: &Path,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        tracing::debug!(path = %path, local = %local.display(), "put_object from file");
        let size = tokio::fs::metadata(local)
            .await
            .map_err(|_| Error::LocalFileNotFound(local.to_path_buf()))?
            .len() as i64;

        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| Error::General(format!("Failed to read {}: {e}", local.display())))?;

        self.send_put_object(path, body, size, content_type).await
    }

    async fn delete_object(&self, path: &RemotePath) -> Result<()> {
        tracing::debug!(path = %path, "delete_object");
        self.inner
            .delete_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(|e| {
                map_sdk_error(e, &path.bucket, || {
                    Error::RemoteObjectNotFound(path.to_string())
                })
            })?;

        Ok(())
    }
}

impl S3Client {
    async fn send_get_object(
        &self,
        path: &RemotePath,
    ) -> Result<aws_sdk_s3::operation::get_object::GetObjectOutput> {
        self.inner
            .get_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(|e| {
                map_sdk_error(e, &path.bucket, || {
                    Error::RemoteObjectNotFound(path.to_string())
                })
            })
    }

    async fn send_put_object(
        &self,
        path: &RemotePath,
        body: ByteStream,
        size: i64,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        let response = self
            .inner
            .put_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .body(body)
            .set_content_type(content_type.clone())
            .send()
            .await
            .map_err(|e| {
                map_sdk_error(e, &path.bucket, || {
                    Error::BucketNotFound(path.bucket.clone())
                })
            })?;

        let mut info = ObjectInfo::file(&path.key, size);
        info.etag = response.e_tag().map(strip_quotes);
        info.content_type = content_type;
        info.last_modified = Some(jiff::Timestamp::now());

        Ok(info)
    }
}

/// Stream `body` into `local`, replacing it only once the whole body arrived
///
/// Data goes to a temporary file next to `local` that is renamed over it on
/// success. A failed or truncated body leaves any existing file untouched and
/// is reported as a remote error.
async fn write_replacing<R>(body: &mut R, local: &Path) -> Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let parent = local
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let (std_file, temp_path) = tempfile::NamedTempFile::new_in(parent)?.into_parts();
    let mut file = tokio::fs::File::from_std(std_file);

    let mut buf = vec![0u8; 64 * 1024];
    let mut written = 0u64;
    loop {
        let n = body
            .read(&mut buf)
            .await
            .map_err(|e| Error::RemoteService(format!("download interrupted: {e}")))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).await?;
        written += n as u64;
    }
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    temp_path.persist(local).map_err(|e| Error::Io(e.error))?;
    Ok(written)
}

/// Translate an SDK failure into the core error type
///
/// `missing` builds the error reported for a 404-style "not found" response.
fn map_sdk_error<E>(err: SdkError<E>, bucket: &str, missing: impl FnOnce() -> Error) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    match classify(err.code(), status) {
        Failure::NoBucket => Error::BucketNotFound(bucket.to_string()),
        Failure::Missing => missing(),
        Failure::Auth => Error::Auth(DisplayErrorContext(&err).to_string()),
        Failure::Other => Error::RemoteService(DisplayErrorContext(&err).to_string()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Failure {
    NoBucket,
    Missing,
    Auth,
    Other,
}

/// Error code wins; HEAD responses carry no body, so fall back to the status.
fn classify(code: Option<&str>, status: Option<u16>) -> Failure {
    match (code, status) {
        (Some("NoSuchBucket"), _) => Failure::NoBucket,
        (Some("NotFound" | "NoSuchKey"), _) => Failure::Missing,
        (
            Some(
                "AccessDenied"
                | "InvalidAccessKeyId"
                | "SignatureDoesNotMatch"
                | "ExpiredToken"
                | "InvalidToken",
            ),
            _,
        ) => Failure::Auth,
        (_, Some(401 | 403)) => Failure::Auth,
        (_, Some(404)) => Failure::Missing,
        _ => Failure::Other,
    }
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(dt.secs()).ok()
}

fn strip_quotes(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}
