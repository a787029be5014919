//! Contact inquiry repository.

use sqlx::{PgPool, Postgres};
use zentro_core::models::{ContactInquiry, NewContactInquiry};
use zentro_core::AppError;

/// Repository for the contact_inquiries table.
#[derive(Clone)]
pub struct InquiryRepository {
    pool: PgPool,
}

impl InquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, inquiry),
        fields(db.table = "contact_inquiries", db.operation = "insert")
    )]
    pub async fn create(&self, inquiry: NewContactInquiry) -> Result<ContactInquiry, AppError> {
        let row: ContactInquiry = sqlx::query_as::<Postgres, ContactInquiry>(
            r#"
            INSERT INTO contact_inquiries (full_name, email, phone, message, property_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&inquiry.full_name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(inquiry.property_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Most recent inquiries first, for the admin dashboard.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "contact_inquiries", db.operation = "select")
    )]
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<ContactInquiry>, AppError> {
        let rows: Vec<ContactInquiry> = sqlx::query_as::<Postgres, ContactInquiry>(
            "SELECT * FROM contact_inquiries ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
