//! Listing cache: an in-memory collection mirrored to a JSON snapshot.
//!
//! Semantics, in order of importance:
//! - the snapshot is read exactly once, at construction; a missing file
//!   seeds the default dataset
//! - every mutation rewrites the whole snapshot; persistence failures are
//!   logged and swallowed, the in-memory state stays authoritative
//! - ids are allocated as `max(existing) + 1` (or 1 when empty), which is
//!   not collision-safe under concurrent writers; this cache has exactly
//!   one writer
//! - a corrupt snapshot is discarded with a warning, never repaired

use std::fs;
use std::path::PathBuf;

use zentro_core::models::Listing;

/// Single-writer cache of the listing collection.
pub struct ListingCache {
    path: PathBuf,
    listings: Vec<Listing>,
}

impl ListingCache {
    /// Load the snapshot at `path`, falling back to the default dataset
    /// when the file is absent or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let listings = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Listing>>(&raw) {
                Ok(listings) => listings,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "discarding corrupt listing snapshot"
                    );
                    default_listings()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => default_listings(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read listing snapshot"
                );
                default_listings()
            }
        };

        ListingCache { path, listings }
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: i64) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Add a listing. Any id on the input is replaced with the allocated
    /// one, which is returned.
    pub fn create(&mut self, mut listing: Listing) -> i64 {
        let id = self.listings.iter().map(|l| l.id).max().map_or(1, |m| m + 1);
        listing.id = id;
        self.listings.push(listing);
        self.persist();
        id
    }

    /// Replace the listing with the given id. Returns false when no such
    /// listing exists.
    pub fn update(&mut self, id: i64, mut listing: Listing) -> bool {
        match self.listings.iter_mut().find(|l| l.id == id) {
            Some(slot) => {
                listing.id = id;
                *slot = listing;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the listing with the given id. Returns whether one was
    /// removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.listings.len();
        self.listings.retain(|l| l.id != id);
        let removed = self.listings.len() < before;
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.listings) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "failed to persist listing snapshot"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize listing snapshot");
            }
        }
    }
}

/// The dataset the cache is seeded with when no snapshot exists.
pub fn default_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            title: "Skyline Heights Apartment".to_string(),
            location: "Kilimani, Nairobi".to_string(),
            price_kes: 18_500_000,
            listing_type: "sale".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            area_sqm: 145,
            description: "Spacious three-bedroom apartment with a balcony \
                          overlooking the Kilimani skyline."
                .to_string(),
            amenities: vec![
                "Backup generator".to_string(),
                "Borehole water".to_string(),
                "Gym".to_string(),
            ],
            image_urls: vec![],
        },
        Listing {
            id: 2,
            title: "Westlands Park View Penthouse".to_string(),
            location: "Westlands, Nairobi".to_string(),
            price_kes: 42_000_000,
            listing_type: "sale".to_string(),
            bedrooms: 4,
            bathrooms: 4,
            area_sqm: 280,
            description: "Duplex penthouse with a private rooftop terrace \
                          and views over Karura forest."
                .to_string(),
            amenities: vec![
                "Rooftop terrace".to_string(),
                "High-speed lifts".to_string(),
                "Two parking bays".to_string(),
            ],
            image_urls: vec![],
        },
        Listing {
            id: 3,
            title: "Lavington Garden Townhouse".to_string(),
            location: "Lavington, Nairobi".to_string(),
            price_kes: 350_000,
            listing_type: "rent".to_string(),
            bedrooms: 4,
            bathrooms: 3,
            area_sqm: 320,
            description: "Townhouse in a gated compound of eight units with \
                          a mature shared garden."
                .to_string(),
            amenities: vec![
                "Gated compound".to_string(),
                "Staff quarters".to_string(),
                "Garden".to_string(),
            ],
            image_urls: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> Listing {
        Listing {
            id: 0,
            title: title.to_string(),
            location: "Kileleshwa, Nairobi".to_string(),
            price_kes: 12_000_000,
            listing_type: "sale".to_string(),
            bedrooms: 2,
            bathrooms: 2,
            area_sqm: 110,
            description: String::new(),
            amenities: vec![],
            image_urls: vec![],
        }
    }

    #[test]
    fn test_missing_snapshot_seeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ListingCache::load(dir.path().join("listings.json"));
        assert_eq!(cache.all().len(), default_listings().len());
    }

    #[test]
    fn test_create_allocates_max_plus_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ListingCache::load(dir.path().join("listings.json"));

        let id = cache.create(draft("Riverside Flat"));
        assert_eq!(id, 4);
        assert_eq!(cache.get(4).unwrap().title, "Riverside Flat");
    }

    #[test]
    fn test_deleting_max_id_lets_it_be_reused() {
        // max(existing) + 1 means a freed top id comes back; pinned here
        // so it cannot change silently.
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ListingCache::load(dir.path().join("listings.json"));

        assert!(cache.delete(3));
        let id = cache.create(draft("Replacement"));
        assert_eq!(id, 3);
    }

    #[test]
    fn test_mutations_are_persisted_for_next_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.json");

        let mut cache = ListingCache::load(&path);
        let id = cache.create(draft("Persisted Flat"));

        let reloaded = ListingCache::load(&path);
        assert_eq!(reloaded.get(id).unwrap().title, "Persisted Flat");
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ListingCache::load(dir.path().join("listings.json"));

        let mut replacement = draft("Renamed");
        replacement.id = 999;
        assert!(cache.update(1, replacement));

        let updated = cache.get(1).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "Renamed");

        assert!(!cache.update(42, draft("Nobody")));
    }

    #[test]
    fn test_corrupt_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.json");
        fs::write(&path, "{not json").unwrap();

        let cache = ListingCache::load(&path);
        assert_eq!(cache.all().len(), default_listings().len());
    }

    #[test]
    fn test_delete_missing_id_is_false_and_does_not_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.json");
        let mut cache = ListingCache::load(&path);

        assert!(!cache.delete(42));
        // No mutation happened, so the snapshot file was never written.
        assert!(!path.exists());
    }
}
