//! Property media manager
//!
//! Orchestrates the object-storage bucket and the metadata store for one
//! logical entity: an image attached to a property. Callers never see the
//! two-step nature of persistence except through the documented
//! partial-failure windows.

use std::sync::Arc;

use uuid::Uuid;
use zentro_core::models::{NewPropertyImage, PropertyImageAsset};
use zentro_core::{constants, AppConfig, AppError, ErrorMetadata, LogLevel};
use zentro_db::PropertyImageStore;
use zentro_storage::{keys, ObjectStorage, UploadSettings};

use crate::types::{ImageUpload, UploadOptions, UploadPolicy};

/// Manages a property's image attachments.
///
/// Collaborators are injected once at construction; there is no global
/// instance. No operation retries: every failure is terminal for that call
/// and the caller decides whether to retry the whole operation.
pub struct PropertyMediaManager {
    storage: Arc<dyn ObjectStorage>,
    images: Arc<dyn PropertyImageStore>,
    bucket: String,
    settings: UploadSettings,
    policy: UploadPolicy,
}

impl PropertyMediaManager {
    pub fn new(storage: Arc<dyn ObjectStorage>, images: Arc<dyn PropertyImageStore>) -> Self {
        PropertyMediaManager {
            storage,
            images,
            bucket: constants::PROPERTY_IMAGES_BUCKET.to_string(),
            settings: UploadSettings::default(),
            policy: UploadPolicy::default(),
        }
    }

    /// Build a manager with bucket, cache lifetime, and policy taken from
    /// configuration.
    pub fn from_config(
        config: &AppConfig,
        storage: Arc<dyn ObjectStorage>,
        images: Arc<dyn PropertyImageStore>,
    ) -> Self {
        PropertyMediaManager {
            storage,
            images,
            bucket: config.image_bucket.clone(),
            settings: UploadSettings {
                cache_control_secs: config.upload_cache_control_secs,
                upsert: false,
            },
            policy: UploadPolicy::from_config(config),
        }
    }

    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Upload an image and attach it to a property.
    ///
    /// The blob goes into the bucket first, then one metadata row is
    /// inserted. If the upload fails nothing is written. If the insert
    /// fails after a successful upload, the blob stays behind as an orphan;
    /// this window is logged but not auto-corrected, and no reconciliation
    /// job exists.
    pub async fn upload_image(
        &self,
        property_id: Uuid,
        upload: ImageUpload,
        options: UploadOptions,
    ) -> Result<PropertyImageAsset, AppError> {
        if let Err(e) = self.policy.check(&upload) {
            return Err(self.fail("upload_image", e));
        }

        let storage_path = keys::image_storage_key(property_id, &upload.file_name);
        let file_size = upload.data.len() as i64;

        if let Err(e) = self
            .storage
            .upload(
                &self.bucket,
                &storage_path,
                &upload.content_type,
                upload.data,
                &self.settings,
            )
            .await
        {
            return Err(self.fail(
                "upload_image",
                AppError::Storage(format!("upload of {} failed: {}", storage_path, e)),
            ));
        }

        let public_url = self.storage.public_url(&self.bucket, &storage_path);
        let alt_text = options
            .alt_text
            .unwrap_or_else(|| format!("Property image for listing {}", property_id));

        let record = NewPropertyImage {
            property_id,
            storage_path: storage_path.clone(),
            file_name: upload.file_name,
            file_size,
            mime_type: upload.content_type,
            alt_text,
            is_primary: options.is_primary,
            display_order: options.display_order,
        };

        let image = match self.images.insert(record).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(
                    bucket = %self.bucket,
                    key = %storage_path,
                    "metadata insert failed after upload; blob is now orphaned"
                );
                return Err(self.fail("upload_image", e));
            }
        };

        tracing::info!(
            property_id = %property_id,
            image_id = %image.id,
            key = %storage_path,
            size_bytes = file_size,
            "property image uploaded"
        );

        Ok(PropertyImageAsset { image, public_url })
    }

    /// All images for a property, ordered by display order, each with its
    /// derived public URL. A property with no images yields an empty
    /// vector, not an error.
    pub async fn property_media(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<PropertyImageAsset>, AppError> {
        let rows = self
            .images
            .list_for_property(property_id)
            .await
            .map_err(|e| self.fail("property_media", e))?;

        Ok(rows
            .into_iter()
            .map(|image| {
                let public_url = self.storage.public_url(&self.bucket, &image.storage_path);
                PropertyImageAsset { image, public_url }
            })
            .collect())
    }

    /// Delete an image: look up the row, remove the blob, remove the row.
    ///
    /// The blob goes first so a failed removal leaves the row as a valid
    /// pointer rather than the reverse. If the row delete fails after the
    /// blob is gone, the row stays behind as an orphan pointing at nothing;
    /// logged, surfaced, not auto-corrected.
    pub async fn delete_image(&self, image_id: Uuid) -> Result<(), AppError> {
        let image = self
            .images
            .get_by_id(image_id)
            .await
            .map_err(|e| self.fail("delete_image", e))?
            .ok_or_else(|| {
                self.fail(
                    "delete_image",
                    AppError::NotFound(format!("property image {} not found", image_id)),
                )
            })?;

        if let Err(e) = self
            .storage
            .remove(&self.bucket, std::slice::from_ref(&image.storage_path))
            .await
        {
            return Err(self.fail(
                "delete_image",
                AppError::Storage(format!("removal of {} failed: {}", image.storage_path, e)),
            ));
        }

        match self.images.delete(image_id).await {
            Ok(_) => {
                tracing::info!(
                    image_id = %image_id,
                    key = %image.storage_path,
                    "property image deleted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    image_id = %image_id,
                    key = %image.storage_path,
                    "row delete failed after blob removal; row is now an orphan"
                );
                Err(self.fail("delete_image", e))
            }
        }
    }

    /// Log a caught failure at the level it reports, then hand it back.
    fn fail(&self, operation: &str, err: AppError) -> AppError {
        match err.log_level() {
            LogLevel::Debug => tracing::debug!(
                operation,
                code = err.error_code(),
                error = %err,
                "media operation failed"
            ),
            LogLevel::Warn => tracing::warn!(
                operation,
                code = err.error_code(),
                error = %err,
                "media operation failed"
            ),
            LogLevel::Error => tracing::error!(
                operation,
                code = err.error_code(),
                error = %err.detailed_message(),
                "media operation failed"
            ),
        }
        err
    }
}
