use crate::traits::{ObjectStorage, StorageError, StorageResult, UploadSettings};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use zentro_core::StorageBackend;

/// Supabase Storage implementation
///
/// Talks to the Supabase Storage HTTP API with a service-role key. Public
/// URLs are derived locally from the project URL; no round-trip is needed
/// because public buckets follow a fixed URL pattern.
#[derive(Clone)]
pub struct SupabaseStorage {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorage {
    /// Create a new SupabaseStorage instance
    ///
    /// # Arguments
    /// * `base_url` - Supabase project URL (e.g., "https://xyz.supabase.co")
    /// * `service_key` - Service-role key with storage access
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        SupabaseStorage {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    /// Percent-encode a key per path segment, keeping the `/` separators.
    fn encode_key(key: &str) -> String {
        key.split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            Self::encode_key(key)
        )
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
        settings: &UploadSettings,
    ) -> StorageResult<()> {
        let url = self.object_url(bucket, key);
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header(
                CACHE_CONTROL,
                format!("max-age={}", settings.cache_control_secs),
            )
            .header("x-upsert", if settings.upsert { "true" } else { "false" })
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                bucket = %bucket,
                key = %key,
                status = %status,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Supabase upload failed"
            );
            return Err(StorageError::UploadFailed(format!("{}: {}", status, body)));
        }

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Supabase upload successful"
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            Self::encode_key(key)
        )
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, bucket);
        let start = std::time::Instant::now();

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({ "prefixes": keys }))
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                bucket = %bucket,
                count = keys.len(),
                status = %status,
                "Supabase remove failed"
            );
            return Err(StorageError::RemoveFailed(format!("{}: {}", status, body)));
        }

        tracing::info!(
            bucket = %bucket,
            count = keys.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Supabase remove successful"
        );

        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let url = format!(
            "{}/storage/v1/object/info/{}/{}",
            self.base_url,
            bucket,
            Self::encode_key(key)
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(StorageError::BackendError(format!(
                "object info returned {}",
                status
            ))),
        }
    }

    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let url = format!(
            "{}/storage/v1/object/authenticated/{}/{}",
            self.base_url,
            bucket,
            Self::encode_key(key)
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(StorageError::DownloadFailed(format!(
                "download returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Supabase
    }
}
