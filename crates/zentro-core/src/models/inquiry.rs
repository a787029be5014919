use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contact inquiry submitted from the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ContactInquiry {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    /// Set when the inquiry was made from a specific listing page.
    pub property_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a contact inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactInquiry {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub property_id: Option<Uuid>,
}
