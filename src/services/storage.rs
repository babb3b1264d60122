//! Object-storage collaborator.
//!
//! Resume bytes live in an S3-compatible bucket (MinIO locally, AWS in
//! production); this service owns the three interactions the candidate
//! lifecycle needs: uploading an object, minting a time-limited signed GET
//! URL for it, and fetching bytes server-side for the resume proxy.

use std::path::Path;
use std::time::Duration;

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{Error, Result};

pub struct ObjectStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    signed_url_ttl: Duration,
    http: reqwest::Client,
}

impl ObjectStorage {
    /// Constructs the storage client from configuration. Works against
    /// MinIO (custom endpoint) or AWS.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            config.secret_access_key.expose_secret(),
            None,
            None,
            "refrd-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        Self {
            client: aws_sdk_s3::Client::new(&s3_config),
            bucket: config.bucket.clone(),
            signed_url_ttl: Duration::from_secs(config.signed_url_ttl_seconds),
            http: reqwest::Client::new(),
        }
    }

    /// Mints a unique object key for an uploaded resume, preserving the
    /// original file extension: `resumes/<uuid>.<ext>`.
    pub fn object_key(filename: &str) -> String {
        match Path::new(filename).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("resumes/{}.{}", Uuid::now_v7(), ext.to_lowercase()),
            None => format!("resumes/{}", Uuid::now_v7()),
        }
    }

    /// Recovers the object key from a stored signed URL so a fresh
    /// signature can be minted after the embedded one expires.
    pub fn key_from_url(url: &str) -> Option<String> {
        let path = url.split('?').next()?;
        let idx = path.find("resumes/")?;
        Some(path[idx..].to_string())
    }

    /// Uploads an object to the bucket.
    pub async fn put_object(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Upload of {} failed: {}", key, e)))?;

        Ok(())
    }

    /// Returns a time-limited signed GET URL for a stored object.
    ///
    /// The expiration is baked into the URL at mint time and is not tracked
    /// afterwards; callers persist the URL as-is.
    pub async fn signed_url(&self, key: &str) -> Result<String> {
        let presigning = PresigningConfig::expires_in(self.signed_url_ttl)
            .map_err(|e| Error::Storage(format!("Invalid signed URL expiration: {}", e)))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| Error::Storage(format!("Presigning {} failed: {}", key, e)))?;

        Ok(request.uri().to_string())
    }

    /// Fetches object bytes server-side through a signed URL.
    ///
    /// This is the resume-proxy path: the server streams the file to the
    /// client instead of redirecting, so browsers never hit the object
    /// store cross-origin.
    pub async fn download(&self, url: &str) -> Result<Bytes> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Resume download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Storage(format!(
                "Resume download failed with status {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| Error::Storage(format!("Resume download failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[test]
    fn test_object_key_preserves_extension() {
        let key = ObjectStorage::object_key("Jane Resume.PDF");
        assert!(key.starts_with("resumes/"));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn test_object_key_without_extension() {
        let key = ObjectStorage::object_key("resume");
        assert!(key.starts_with("resumes/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_object_keys_are_unique() {
        let a = ObjectStorage::object_key("a.pdf");
        let b = ObjectStorage::object_key("a.pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_from_url() {
        assert_eq!(
            ObjectStorage::key_from_url(
                "http://localhost:9000/refrd-resumes/resumes/abc.pdf?X-Amz-Expires=3600"
            )
            .as_deref(),
            Some("resumes/abc.pdf")
        );
        assert_eq!(ObjectStorage::key_from_url("http://localhost:9000/other"), None);
    }

    #[tokio::test]
    async fn test_signed_url_contains_key_and_expiration() {
        let storage = ObjectStorage::from_config(&StorageConfig::default()).await;
        let url = storage.signed_url("resumes/test.pdf").await.unwrap();

        assert!(url.contains("resumes/test.pdf"));
        assert!(url.contains("X-Amz-Expires"), "URL should be time-limited: {url}");
    }
}
