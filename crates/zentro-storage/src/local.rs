use crate::traits::{ObjectStorage, StorageError, StorageResult, UploadSettings};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use zentro_core::StorageBackend;

/// Local filesystem storage implementation
///
/// Blobs live under `{base_path}/{bucket}/{key}` and are served from
/// `{base_url}/{bucket}/{key}` by whatever static file server fronts the
/// directory. Intended for development and tests.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage
    /// * `base_url` - Base URL the directory is served from
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Convert bucket + key to a filesystem path, rejecting keys that could
    /// escape the base storage directory.
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        for part in [bucket, key] {
            if part.contains("..") || part.starts_with('/') || part.is_empty() {
                return Err(StorageError::InvalidKey(
                    "Storage key contains invalid characters".to_string(),
                ));
            }
        }
        Ok(self.base_path.join(bucket).join(key))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        _content_type: &str,
        data: Vec<u8>,
        settings: &UploadSettings,
    ) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        if !settings.upsert && fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, bucket, key)
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> StorageResult<()> {
        let start = std::time::Instant::now();

        for key in keys {
            let path = self.object_path(bucket, key)?;
            if !fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }
            fs::remove_file(&path).await.map_err(|e| {
                StorageError::RemoveFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        tracing::info!(
            bucket = %bucket,
            count = keys.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage remove successful"
        );

        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let path = self.object_path(bucket, key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(data)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BUCKET: &str = "property-images";

    async fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:3000/media".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;
        let data = b"front elevation".to_vec();

        storage
            .upload(
                BUCKET,
                "prop-1/facade.jpg",
                "image/jpeg",
                data.clone(),
                &UploadSettings::default(),
            )
            .await
            .unwrap();

        let downloaded = storage.download(BUCKET, "prop-1/facade.jpg").await.unwrap();
        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn test_upload_refuses_overwrite_without_upsert() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;
        let settings = UploadSettings::default();

        storage
            .upload(BUCKET, "prop-1/a.jpg", "image/jpeg", vec![1], &settings)
            .await
            .unwrap();

        let result = storage
            .upload(BUCKET, "prop-1/a.jpg", "image/jpeg", vec![2], &settings)
            .await;
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));

        let upsert = UploadSettings {
            upsert: true,
            ..UploadSettings::default()
        };
        storage
            .upload(BUCKET, "prop-1/a.jpg", "image/jpeg", vec![2], &upsert)
            .await
            .unwrap();
        assert_eq!(storage.download(BUCKET, "prop-1/a.jpg").await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage.download(BUCKET, "../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists(BUCKET, "/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .remove(BUCKET, &["../escape.jpg".to_string()])
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        let result = storage
            .remove(BUCKET, &["prop-1/nonexistent.jpg".to_string()])
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_exists_and_remove() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        storage
            .upload(
                BUCKET,
                "prop-2/pool.webp",
                "image/webp",
                b"pool".to_vec(),
                &UploadSettings::default(),
            )
            .await
            .unwrap();

        assert!(storage.exists(BUCKET, "prop-2/pool.webp").await.unwrap());

        storage
            .remove(BUCKET, &["prop-2/pool.webp".to_string()])
            .await
            .unwrap();
        assert!(!storage.exists(BUCKET, "prop-2/pool.webp").await.unwrap());
    }

    #[tokio::test]
    async fn test_public_url_shape() {
        let dir = tempdir().unwrap();
        let storage = storage(&dir).await;

        assert_eq!(
            storage.public_url(BUCKET, "prop-1/facade.jpg"),
            "http://localhost:3000/media/property-images/prop-1/facade.jpg"
        );
    }
}
