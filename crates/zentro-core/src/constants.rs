//! Shared constants.

/// Bucket holding full-size property images.
pub const PROPERTY_IMAGES_BUCKET: &str = "property-images";

/// Second bucket declared in the storage project. No operation in this
/// workspace writes to it; it is carried in configuration only.
pub const PROPERTY_THUMBNAILS_BUCKET: &str = "property-thumbnails";

/// Cache lifetime hint attached to uploaded blobs, in seconds.
pub const UPLOAD_CACHE_CONTROL_SECS: u32 = 3600;

/// Default ceiling for a single image upload.
pub const MAX_IMAGE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for property images unless overridden by config.
pub const DEFAULT_IMAGE_CONTENT_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/gif"];
