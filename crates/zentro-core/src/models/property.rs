use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A property listing managed by the back office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub price_kes: i64,
    /// "sale" or "rent".
    pub listing_type: String,
    pub status: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_sqm: i32,
    pub description: String,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub title: String,
    pub location: String,
    pub price_kes: i64,
    pub listing_type: String,
    pub status: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_sqm: i32,
    pub description: String,
    pub amenities: Vec<String>,
}
