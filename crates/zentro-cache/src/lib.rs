//! Zentro Cache Library
//!
//! A convenience mirror of the listing collection for offline-style edits.
//! Not a system of record: the database is, and nothing here reconciles
//! with it.

pub mod listings;

pub use listings::{default_listings, ListingCache};
