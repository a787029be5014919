//! Store traits consumed by higher layers.

use async_trait::async_trait;
use uuid::Uuid;
use zentro_core::models::{NewPropertyImage, PropertyImage};
use zentro_core::AppError;

/// Metadata store for property image attachments.
///
/// The media manager orchestrates this store together with an object-storage
/// backend; keeping it behind a trait lets tests drive the manager without a
/// database.
#[async_trait]
pub trait PropertyImageStore: Send + Sync {
    /// Insert one row. The store assigns `id` and `created_at`.
    async fn insert(&self, image: NewPropertyImage) -> Result<PropertyImage, AppError>;

    /// All rows for a property, ordered by `display_order` ascending with
    /// insertion order as the stable tie-break.
    async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<PropertyImage>, AppError>;

    /// Fetch one row by id.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<PropertyImage>, AppError>;

    /// Delete one row by id. Returns whether a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
