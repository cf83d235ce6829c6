//! Object-storage bucket client.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::Config;

/// Cache directive attached to every upload. Object keys keep their content
/// in steady state, so downstream caches may hold them for a year.
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// One entry from the bucket list endpoint.
#[derive(Debug, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
}

/// Authenticated client for one bucket.
pub struct StorageClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(config: &Config, bucket: &str) -> Self {
        StorageClient {
            http: reqwest::blocking::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            bucket: bucket.to_string(),
        }
    }

    /// Write endpoint for one object key.
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, key
        )
    }

    /// Public, unauthenticated URL the storefront serves images from.
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }

    /// Upload a local file under `key`, overwriting any existing object.
    /// Returns the public URL of the uploaded object.
    pub fn upload_file(&self, path: &Path, key: &str) -> Result<String, StorageError> {
        let bytes = fs::read(path).map_err(|e| StorageError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        self.upload_bytes(bytes, key)?;
        Ok(self.public_url(key))
    }

    /// Upload raw bytes under `key` with upsert semantics.
    pub fn upload_bytes(&self, bytes: Vec<u8>, key: &str) -> Result<(), StorageError> {
        let response = self
            .http
            .post(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("Content-Type", content_type_for(key))
            .header("Cache-Control", CACHE_CONTROL)
            .header("x-upsert", "true")
            .body(bytes)
            .send()?;
        check(response)?;
        Ok(())
    }

    /// List up to `limit` objects under `prefix` (empty prefix = whole bucket).
    pub fn list(&self, prefix: &str, limit: usize) -> Result<Vec<ObjectEntry>, StorageError> {
        let url = format!(
            "{}/storage/v1/object/list/{}",
            self.base_url, self.bucket
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .json(&json!({ "prefix": prefix, "limit": limit }))
            .send()?;
        Ok(check(response)?.json()?)
    }

    /// Bulk-remove objects by key. Destructive; callers confirm first.
    pub fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);
        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .json(&json!({ "prefixes": keys }))
            .send()?;
        check(response)?;
        Ok(())
    }
}

/// Content type from the key's extension. Outputs are WebP; the fallback
/// covers stray re-uploads of original sources.
fn content_type_for(key: &str) -> &'static str {
    let lower = key.to_lowercase();
    if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StorageError::Status {
            status,
            body: response.text().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;

    fn test_client() -> StorageClient {
        let config = Config {
            base_url: "https://example.supabase.co".to_string(),
            api_key: "test-key".to_string(),
            credential: Credential::ServiceRole,
        };
        StorageClient::new(&config, "images")
    }

    #[test]
    fn object_and_public_urls() {
        let client = test_client();
        assert_eq!(
            client.object_url("mini-poker.webp"),
            "https://example.supabase.co/storage/v1/object/images/mini-poker.webp"
        );
        assert_eq!(
            client.public_url("mini-poker.webp"),
            "https://example.supabase.co/storage/v1/object/public/images/mini-poker.webp"
        );
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("a.JPeG"), "image/jpeg");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }

    #[test]
    fn missing_local_file_is_an_io_error() {
        let client = test_client();
        let err = client
            .upload_file(Path::new("/nonexistent/file.webp"), "file.webp")
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
