//! S3-compatible object storage for property images.
//!
//! The bucket is addressed path-style so local S3 stands (Garage, MinIO)
//! resolve keys as `http://host:port/bucket/key`.

use std::time::Duration;

use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use thiserror::Error;

use crate::config::Env;
use crate::error::ApiError;

/// How long an upload URL stays valid.
const PRESIGN_EXPIRY: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("presigning failed: {0}")]
    Presign(String),

    #[error("storage request failed: {0}")]
    Request(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("object storage error: {err}");
        ApiError::internal(err.to_string())
    }
}

pub struct Storage {
    client: Client,
    bucket: String,
    public_url: String,
}

impl Storage {
    pub async fn from_env(env: &Env) -> Self {
        let credentials = Credentials::new(
            env.s3_access_key.clone(),
            env.s3_secret_key.clone(),
            None,
            None,
            "env",
        );
        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(env.s3_region.clone()))
            .endpoint_url(&env.s3_endpoint)
            .credentials_provider(credentials)
            .load()
            .await;
        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
            bucket: env.s3_bucket_property_images.clone(),
            public_url: env.s3_public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Presigned PUT so the frontend uploads directly to storage.
    pub async fn presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(PRESIGN_EXPIRY)
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Ok(presigned.uri().to_string())
    }

    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Ok(())
    }

    /// Public URL for a stored key.
    pub fn public_url(&self, key: &str) -> String {
        build_public_url(&self.public_url, &self.bucket, key)
    }

    /// Recover the storage key from a stored URL. Unknown URLs yield `None`
    /// and the caller skips the storage delete.
    pub fn extract_key(&self, file_url: &str) -> Option<String> {
        extract_key(&self.bucket, file_url)
    }
}

fn build_public_url(public_url: &str, bucket: &str, key: &str) -> String {
    format!("{public_url}/{bucket}/{key}")
}

fn extract_key(bucket: &str, file_url: &str) -> Option<String> {
    let parsed = url::Url::parse(file_url).ok()?;
    let path = parsed.path().trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    let key = path
        .strip_prefix(&format!("{bucket}/"))
        .unwrap_or(path);
    Some(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_joins_host_bucket_and_key() {
        assert_eq!(
            build_public_url(
                "http://localhost:3903",
                "property-images",
                "properties/1/abc.jpg"
            ),
            "http://localhost:3903/property-images/properties/1/abc.jpg"
        );
    }

    #[test]
    fn extract_key_round_trips_public_urls() {
        let url = build_public_url(
            "http://localhost:3903",
            "property-images",
            "properties/1/abc.jpg",
        );
        assert_eq!(
            extract_key("property-images", &url).as_deref(),
            Some("properties/1/abc.jpg")
        );
    }

    #[test]
    fn extract_key_tolerates_foreign_urls() {
        assert_eq!(
            extract_key("property-images", "https://cdn.example.com/some/key.png").as_deref(),
            Some("some/key.png")
        );
        assert_eq!(extract_key("property-images", "not a url"), None);
        assert_eq!(extract_key("property-images", "http://host/"), None);
    }
}
