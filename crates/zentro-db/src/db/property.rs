//! Property repository: CRUD for the properties table.

use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zentro_core::models::{NewProperty, Property};
use zentro_core::AppError;

/// Repository for the properties table.
#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, property),
        fields(db.table = "properties", db.operation = "insert")
    )]
    pub async fn create(&self, property: NewProperty) -> Result<Property, AppError> {
        let row: Property = sqlx::query_as::<Postgres, Property>(
            r#"
            INSERT INTO properties (
                title, location, price_kes, listing_type, status,
                bedrooms, bathrooms, area_sqm, description, amenities
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&property.title)
        .bind(&property.location)
        .bind(property.price_kes)
        .bind(&property.listing_type)
        .bind(&property.status)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.area_sqm)
        .bind(&property.description)
        .bind(&property.amenities)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    #[tracing::instrument(
        skip(self),
        fields(db.table = "properties", db.operation = "select", db.record_id = %id)
    )]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Property>, AppError> {
        let row: Option<Property> =
            sqlx::query_as::<Postgres, Property>("SELECT * FROM properties WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    /// Newest listings first.
    #[tracing::instrument(skip(self), fields(db.table = "properties", db.operation = "select"))]
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Property>, AppError> {
        let rows: Vec<Property> = sqlx::query_as::<Postgres, Property>(
            "SELECT * FROM properties ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Delete a property. Image rows cascade; the image blobs do not.
    /// Delete the attachments through the media manager first.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "properties", db.operation = "delete", db.record_id = %id)
    )]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }
}
