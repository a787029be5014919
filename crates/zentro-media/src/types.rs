//! Input types for media upload operations.

use zentro_core::constants;
use zentro_core::{AppConfig, AppError};

/// Binary payload handed to `upload_image`.
///
/// `file_name` and `content_type` are captured into the metadata row as-is;
/// the stored file size is derived from `data`.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        ImageUpload {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Caller-supplied attachment options, all optional.
///
/// `alt_text` falls back to a generated caption, `is_primary` to false and
/// `display_order` to 0.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub display_order: i32,
}

/// Upload acceptance policy, checked before any side effect.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size: usize,
    pub allowed_content_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        UploadPolicy {
            max_file_size: constants::MAX_IMAGE_SIZE_BYTES,
            allowed_content_types: constants::DEFAULT_IMAGE_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl UploadPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        UploadPolicy {
            max_file_size: config.max_image_size_bytes,
            allowed_content_types: config.allowed_image_content_types.clone(),
        }
    }

    /// Check an upload against the policy. A rejected upload has had no
    /// side effects.
    pub fn check(&self, upload: &ImageUpload) -> Result<(), AppError> {
        if upload.file_name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Image file name must not be empty".to_string(),
            ));
        }

        if upload.data.len() > self.max_file_size {
            return Err(AppError::PayloadTooLarge(format!(
                "Image is {} bytes, limit is {}",
                upload.data.len(),
                self.max_file_size
            )));
        }

        let content_type = upload.content_type.to_lowercase();
        if !self.allowed_content_types.contains(&content_type) {
            return Err(AppError::InvalidInput(format!(
                "Content type {} is not an accepted image type",
                upload.content_type
            )));
        }

        Ok(())
    }
}
