//! Validation modules

pub mod video_url;

pub use video_url::{validate_youtube_url, VideoUrlValidation};
