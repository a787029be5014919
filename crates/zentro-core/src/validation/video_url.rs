//! Video tour URL validation
//!
//! Listings may carry a YouTube video tour. The admin form accepts the four
//! URL shapes YouTube hands out (`watch?v=`, `youtu.be/`, `embed/`,
//! `shorts/`), each carrying an 11-character video id.

use std::sync::OnceLock;

use regex::Regex;

/// Outcome of validating a video tour URL.
///
/// Always a value, never an error: callers render `message` next to the
/// form field either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrlValidation {
    pub is_valid: bool,
    pub message: String,
}

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$",
        )
        .expect("youtube URL pattern is valid")
    })
}

/// Validate a YouTube video URL.
///
/// Blank input is reported with a message distinct from a structurally
/// invalid URL so the form can tell "nothing entered" from "wrong link".
pub fn validate_youtube_url(url: &str) -> VideoUrlValidation {
    if url.trim().is_empty() {
        return VideoUrlValidation {
            is_valid: false,
            message: "No video URL provided".to_string(),
        };
    }

    if youtube_pattern().is_match(url.trim()) {
        VideoUrlValidation {
            is_valid: true,
            message: "Valid YouTube video URL".to_string(),
        }
    } else {
        VideoUrlValidation {
            is_valid: false,
            message: "Not a recognized YouTube video URL".to_string(),
        }
    }
}
