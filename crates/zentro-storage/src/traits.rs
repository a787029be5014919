//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends
//! must implement.

use async_trait::async_trait;
use thiserror::Error;
use zentro_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Remove failed: {0}")]
    RemoveFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Settings applied to a blob at upload time.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Cache lifetime hint forwarded to the backend, in seconds.
    pub cache_control_secs: u32,
    /// When false, an existing key is a failure rather than an overwrite.
    pub upsert: bool,
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            cache_control_secs: zentro_core::constants::UPLOAD_CACHE_CONTROL_SECS,
            upsert: false,
        }
    }
}

/// Storage abstraction trait
///
/// All storage backends (Supabase, local filesystem) must implement this
/// trait. This allows the media manager to work with any backend without
/// coupling to implementation details.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a blob under `key` in `bucket`.
    ///
    /// With `settings.upsert == false` the upload fails with
    /// `StorageError::AlreadyExists` when the key is taken.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Vec<u8>,
        settings: &UploadSettings,
    ) -> StorageResult<()>;

    /// Derive the externally reachable URL for a key.
    ///
    /// Pure derivation from the known URL pattern; no round-trip and no
    /// failure mode, whether or not the blob exists.
    fn public_url(&self, bucket: &str, key: &str) -> String;

    /// Remove the blobs at the given keys. Missing keys are not an error.
    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Download a blob by its key
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
