//! Shared key generation for storage backends.
//!
//! Key format: `{property_id}/{millis}_{token}.{ext}`.

use chrono::Utc;
use rand::distr::{Alphanumeric, SampleString};
use uuid::Uuid;

const TOKEN_LEN: usize = 8;

/// Generate a storage key for an image attached to the given property.
///
/// The millisecond timestamp and random token make concurrent uploads for
/// the same property collision-free without coordination; the property-id
/// prefix scopes listing and cleanup per property.
pub fn image_storage_key(property_id: Uuid, file_name: &str) -> String {
    let token = Alphanumeric
        .sample_string(&mut rand::rng(), TOKEN_LEN)
        .to_lowercase();
    format!(
        "{}/{}_{}.{}",
        property_id,
        Utc::now().timestamp_millis(),
        token,
        file_extension(file_name)
    )
}

/// Lower-cased extension of a file name, `bin` when there is none.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_lowercase(),
        _ => "bin".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_namespaced_by_property() {
        let property_id = Uuid::new_v4();
        let key = image_storage_key(property_id, "veranda.jpg");
        assert!(key.starts_with(&format!("{}/", property_id)));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_extension_is_lowercased() {
        let key = image_storage_key(Uuid::new_v4(), "Facade.JPG");
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_missing_extension_falls_back_to_bin() {
        assert_eq!(file_extension("snapshot"), "bin");
        assert_eq!(file_extension(".hidden"), "bin");
        assert_eq!(file_extension("trailing."), "bin");
        assert_eq!(file_extension("plan.webp"), "webp");
    }

    #[test]
    fn test_consecutive_keys_differ() {
        let property_id = Uuid::new_v4();
        let a = image_storage_key(property_id, "a.png");
        let b = image_storage_key(property_id, "a.png");
        assert_ne!(a, b);
    }
}
