//! Object-storage fetch for stored CVs (AWS S3 or MinIO).

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use crate::config::Config;
use crate::documents::extract::extract_text;
use crate::documents::{DocumentError, MAX_DOCUMENT_BYTES};

/// Bucket + key pair resolved from a caller-supplied document URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
}

impl S3Location {
    /// Accepts `s3://bucket/key`, virtual-hosted AWS URLs
    /// (`https://bucket.s3.region.amazonaws.com/key`), path-style URLs
    /// (`https://host/bucket/key`, as MinIO serves them) and bare keys,
    /// which resolve against `default_bucket`.
    pub fn parse(url: &str, default_bucket: Option<&str>) -> Result<Self, DocumentError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DocumentError::InvalidLocation(url.to_string()));
        }

        if let Some(rest) = url.strip_prefix("s3://") {
            let (bucket, key) = rest
                .split_once('/')
                .ok_or_else(|| DocumentError::InvalidLocation(url.to_string()))?;
            return Self::new(url, bucket, key);
        }

        let without_scheme = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));

        let Some(rest) = without_scheme else {
            let bucket = default_bucket
                .filter(|b| !b.is_empty())
                .ok_or_else(|| DocumentError::MissingBucket(url.to_string()))?;
            return Self::new(url, bucket, url.trim_start_matches('/'));
        };

        // Presigned URLs carry auth in the query string; the SDK signs its own request.
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = host.split(':').next().unwrap_or_default();

        if host.ends_with(".amazonaws.com") {
            if let Some(idx) = host.find(".s3.").or_else(|| host.find(".s3-")) {
                return Self::new(url, &host[..idx], path);
            }
        }

        let (bucket, key) = path
            .split_once('/')
            .ok_or_else(|| DocumentError::InvalidLocation(url.to_string()))?;
        Self::new(url, bucket, key)
    }

    fn new(url: &str, bucket: &str, key: &str) -> Result<Self, DocumentError> {
        let key = urlencoding::decode(key)
            .map_err(|_| DocumentError::InvalidLocation(url.to_string()))?;
        if bucket.is_empty() || key.is_empty() {
            return Err(DocumentError::InvalidLocation(url.to_string()));
        }
        Ok(Self {
            bucket: bucket.to_string(),
            key: key.into_owned(),
        })
    }
}

/// Builds an S3 client for MinIO (custom endpoint, path-style) or AWS.
/// Without static keys the default AWS provider chain supplies credentials.
pub async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()));

    if let Some((access_key_id, secret_access_key)) = config.static_aws_credentials() {
        loader = loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "ai-static",
        ));
    }
    if let Some(endpoint) = &config.s3_endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.s3_endpoint.is_some())
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}

/// Fetches CV documents from object storage and turns them into text.
#[derive(Clone)]
pub struct DocumentStore {
    client: aws_sdk_s3::Client,
    default_bucket: Option<String>,
}

impl DocumentStore {
    pub fn new(client: aws_sdk_s3::Client, default_bucket: Option<String>) -> Self {
        Self {
            client,
            default_bucket,
        }
    }

    pub fn locate(&self, url: &str) -> Result<S3Location, DocumentError> {
        S3Location::parse(url, self.default_bucket.as_deref())
    }

    /// Downloads the object behind `url` and extracts its text.
    pub async fn fetch_text(&self, url: &str) -> Result<String, DocumentError> {
        let location = self.locate(url)?;
        info!("Fetching document s3://{}/{}", location.bucket, location.key);

        let output = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| DocumentError::Fetch(DisplayErrorContext(&e).to_string()))?;

        let declared = output.content_length().unwrap_or(0).max(0) as usize;
        check_size(declared)?;

        let bytes = read_bounded(output.body, MAX_DOCUMENT_BYTES).await?;
        debug!("Fetched {} bytes", bytes.len());

        // PDF parsing is CPU-bound; a panic inside the parser surfaces as a JoinError.
        tokio::task::spawn_blocking(move || extract_text(&bytes))
            .await
            .map_err(|e| DocumentError::Extraction(e.to_string()))?
    }
}

/// Reads `body` chunk by chunk, giving up as soon as it grows past `limit`.
/// `content_length` is optional, so the declared size alone cannot be trusted.
async fn read_bounded(mut body: ByteStream, limit: usize) -> Result<Vec<u8>, DocumentError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(|e| DocumentError::Fetch(e.to_string()))?
    {
        let size = buffer.len() + chunk.len();
        if size > limit {
            return Err(DocumentError::TooLarge { size, limit });
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

fn check_size(size: usize) -> Result<(), DocumentError> {
    if size > MAX_DOCUMENT_BYTES {
        return Err(DocumentError::TooLarge {
            size,
            limit: MAX_DOCUMENT_BYTES,
        });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn offline_client() -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();
    aws_sdk_s3::Client::from_conf(config)
}
