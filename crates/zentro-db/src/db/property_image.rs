//! Property image repository: CRUD for the property_images table.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zentro_core::models::{NewPropertyImage, PropertyImage};
use zentro_core::AppError;

use crate::stores::PropertyImageStore;

/// Repository for the property_images table.
#[derive(Clone)]
pub struct PropertyImageRepository {
    pool: PgPool,
}

impl PropertyImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new image row and return it with its assigned id.
    #[tracing::instrument(
        skip(self, image),
        fields(db.table = "property_images", db.operation = "insert", property_id = %image.property_id)
    )]
    pub async fn create(&self, image: NewPropertyImage) -> Result<PropertyImage, AppError> {
        let row: PropertyImage = sqlx::query_as::<Postgres, PropertyImage>(
            r#"
            INSERT INTO property_images (
                property_id, storage_path, file_name, file_size,
                mime_type, alt_text, is_primary, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(image.property_id)
        .bind(&image.storage_path)
        .bind(&image.file_name)
        .bind(image.file_size)
        .bind(&image.mime_type)
        .bind(&image.alt_text)
        .bind(image.is_primary)
        .bind(image.display_order)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Fetch all images for a property, display order first, insertion
    /// order as the tie-break.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "property_images", db.operation = "select", property_id = %property_id)
    )]
    pub async fn list_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<PropertyImage>, AppError> {
        let rows: Vec<PropertyImage> = sqlx::query_as::<Postgres, PropertyImage>(
            "SELECT * FROM property_images WHERE property_id = $1 \
             ORDER BY display_order ASC, created_at ASC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetch one image row by id.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "property_images", db.operation = "select", db.record_id = %id)
    )]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PropertyImage>, AppError> {
        let row: Option<PropertyImage> =
            sqlx::query_as::<Postgres, PropertyImage>("SELECT * FROM property_images WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    /// Delete one image row by id.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "property_images", db.operation = "delete", db.record_id = %id)
    )]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM property_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }
}

#[async_trait]
impl PropertyImageStore for PropertyImageRepository {
    async fn insert(&self, image: NewPropertyImage) -> Result<PropertyImage, AppError> {
        self.create(image).await
    }

    async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<PropertyImage>, AppError> {
        PropertyImageRepository::list_for_property(self, property_id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<PropertyImage>, AppError> {
        PropertyImageRepository::get_by_id(self, id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_by_id(id).await
    }
}
