use crate::{LocalStorage, ObjectStorage, StorageError, StorageResult, SupabaseStorage};
use std::sync::Arc;
use zentro_core::{AppConfig, StorageBackend};

/// Create a storage backend based on configuration
pub async fn create_storage(config: &AppConfig) -> StorageResult<Arc<dyn ObjectStorage>> {
    let backend = config.storage_backend.unwrap_or(StorageBackend::Supabase);
    tracing::info!(backend = %backend, "initializing object storage");

    match backend {
        StorageBackend::Supabase => {
            let base_url = config.supabase_url.clone().ok_or_else(|| {
                StorageError::ConfigError("SUPABASE_URL not configured".to_string())
            })?;
            let service_key = config.supabase_service_key.clone().ok_or_else(|| {
                StorageError::ConfigError("SUPABASE_SERVICE_KEY not configured".to_string())
            })?;

            Ok(Arc::new(SupabaseStorage::new(base_url, service_key)))
        }

        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}
