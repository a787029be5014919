//! Zentro Media Library
//!
//! The property media lifecycle: uploading an image attaches a blob in the
//! images bucket plus one metadata row, retrieval lists a property's images
//! in display order with derived public URLs, and deletion removes both
//! sides. The two-step writes are intentionally non-atomic; see
//! `PropertyMediaManager` for the exact failure windows.

pub mod manager;
pub mod types;

pub use manager::PropertyMediaManager;
pub use types::{ImageUpload, UploadOptions, UploadPolicy};
// The video tour validator lives in core; re-exported here because callers
// reach for it alongside the manager.
pub use zentro_core::validation::{validate_youtube_url, VideoUrlValidation};
