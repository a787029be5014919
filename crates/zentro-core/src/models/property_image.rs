use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted `property_images` row.
///
/// Every row has a corresponding blob at `storage_path` in the images bucket
/// for the lifetime of the row. The pair is created by an upload and
/// destroyed by a delete; a partial failure between the two writes leaves an
/// orphan on one side (see `zentro-media` for the exact windows).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PropertyImage {
    pub id: Uuid,
    pub property_id: Uuid,
    /// Bucket key the blob lives under. Immutable after creation.
    pub storage_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    /// Accessibility caption. Generated when the uploader supplies none.
    pub alt_text: String,
    /// No per-property uniqueness is enforced for this flag.
    pub is_primary: bool,
    /// Ascending sort key when listing a property's images.
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a property image. `id` and `created_at` are assigned
/// by the metadata store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPropertyImage {
    pub property_id: Uuid,
    pub storage_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub alt_text: String,
    pub is_primary: bool,
    pub display_order: i32,
}

/// A stored image enriched with its derived public URL.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyImageAsset {
    #[serde(flatten)]
    pub image: PropertyImage,
    pub public_url: String,
}
