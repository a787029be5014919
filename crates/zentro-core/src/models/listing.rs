use serde::{Deserialize, Serialize};

/// A listing record as mirrored by the client-side cache.
///
/// Integer-keyed, unlike the database's `Property`: the cache allocates its
/// own ids and never reconciles with the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub price_kes: i64,
    pub listing_type: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_sqm: i32,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}
