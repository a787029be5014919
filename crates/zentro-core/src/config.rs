//! Configuration module
//!
//! Environment-driven configuration for the data layer, the storage
//! backends, and the upload policy, with per-field defaults.

use std::env;

use crate::constants;
use crate::storage_types::StorageBackend;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_IMAGE_SIZE_MB: usize = 10;
const LISTING_SNAPSHOT_FILE: &str = "zentro-listings.json";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub image_bucket: String,
    pub thumbnail_bucket: String,
    pub upload_cache_control_secs: u32,
    // Upload policy
    pub max_image_size_bytes: usize,
    pub allowed_image_content_types: Vec<String>,
    // Listing cache snapshot location
    pub listing_snapshot_path: String,
}

impl AppConfig {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| s.parse::<StorageBackend>().ok());

        let max_image_size_mb = env::var("MAX_IMAGE_SIZE_MB")
            .unwrap_or_else(|_| MAX_IMAGE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_IMAGE_SIZE_MB);

        let allowed_image_content_types = env::var("ALLOWED_IMAGE_CONTENT_TYPES")
            .unwrap_or_else(|_| constants::DEFAULT_IMAGE_CONTENT_TYPES.join(","))
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = AppConfig {
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_backend,
            supabase_url: env::var("SUPABASE_URL").ok().filter(|s| !s.is_empty()),
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            image_bucket: env::var("PROPERTY_IMAGE_BUCKET")
                .unwrap_or_else(|_| constants::PROPERTY_IMAGES_BUCKET.to_string()),
            thumbnail_bucket: env::var("PROPERTY_THUMBNAIL_BUCKET")
                .unwrap_or_else(|_| constants::PROPERTY_THUMBNAILS_BUCKET.to_string()),
            upload_cache_control_secs: env::var("UPLOAD_CACHE_CONTROL_SECS")
                .unwrap_or_else(|_| constants::UPLOAD_CACHE_CONTROL_SECS.to_string())
                .parse()
                .unwrap_or(constants::UPLOAD_CACHE_CONTROL_SECS),
            max_image_size_bytes: max_image_size_mb * 1024 * 1024,
            allowed_image_content_types,
            listing_snapshot_path: env::var("LISTING_SNAPSHOT_PATH")
                .unwrap_or_else(|_| LISTING_SNAPSHOT_FILE.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        let backend = self.storage_backend.unwrap_or(StorageBackend::Supabase);
        match backend {
            StorageBackend::Supabase => {
                if self.supabase_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "SUPABASE_URL must be set when using the Supabase storage backend"
                    ));
                }
                if self.supabase_service_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "SUPABASE_SERVICE_KEY must be set when using the Supabase storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using the local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            environment: "development".to_string(),
            database_url: "postgresql://localhost/zentro".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            storage_backend: Some(StorageBackend::Local),
            supabase_url: None,
            supabase_service_key: None,
            local_storage_path: Some("/tmp/zentro-media".to_string()),
            local_storage_base_url: Some("http://localhost:3000/media".to_string()),
            image_bucket: constants::PROPERTY_IMAGES_BUCKET.to_string(),
            thumbnail_bucket: constants::PROPERTY_THUMBNAILS_BUCKET.to_string(),
            upload_cache_control_secs: constants::UPLOAD_CACHE_CONTROL_SECS,
            max_image_size_bytes: constants::MAX_IMAGE_SIZE_BYTES,
            allowed_image_content_types: constants::DEFAULT_IMAGE_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            listing_snapshot_path: LISTING_SNAPSHOT_FILE.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_local_backend() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_postgres_url() {
        let mut config = base_config();
        config.database_url = "mysql://localhost/zentro".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_supabase_credentials() {
        let mut config = base_config();
        config.storage_backend = Some(StorageBackend::Supabase);
        assert!(config.validate().is_err());

        config.supabase_url = Some("https://example.supabase.co".to_string());
        assert!(config.validate().is_err());

        config.supabase_service_key = Some("service-key".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_local_paths() {
        let mut config = base_config();
        config.local_storage_path = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}
