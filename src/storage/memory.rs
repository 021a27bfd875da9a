//! In-memory store repository.
//!
//! This module provides [`MemoryRepository`], the default [`StoreRepository`]
//! backend. Records live in a `Vec` for the lifetime of the worker thread and
//! are seeded with a small fixed dataset, standing in for a remote API that
//! does not exist yet.

use crate::domain::error::Result;
use crate::domain::{Store, StoreDraft, StorekeeperError, StorePatch};
use crate::storage::repository::StoreRepository;

/// In-memory store collection with newest-first ordering.
///
/// New records are inserted at the front so recently created stores appear at
/// the top of page one. Ids are derived from the insertion time in milliseconds
/// and bumped until unique, mirroring how the eventual backend would hand out
/// opaque identifiers.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    stores: Vec<Store>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self { stores: Vec::new() }
    }

    /// Creates a repository seeded with the sample dataset.
    ///
    /// The seed contains three stores (Tech Store Central, Fashion Hub,
    /// Coffee Corner) so the plugin shows meaningful content on first load.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            stores: vec![
                Store {
                    id: "1".to_string(),
                    name: "Tech Store Central".to_string(),
                    alias: "tech-store-central".to_string(),
                    description: "Your one-stop shop for all technology needs including laptops, smartphones, accessories, and more.".to_string(),
                    latitude: 10.762622,
                    longitude: 106.660172,
                    image: "/modern-tech-store.png".to_string(),
                    thumbnail: "/tech-store-storefront.jpg".to_string(),
                    address: Some("123 Tech Street, District 1, Ho Chi Minh City".to_string()),
                    created_at: "2024-01-15T10:00:00Z".to_string(),
                },
                Store {
                    id: "2".to_string(),
                    name: "Fashion Hub".to_string(),
                    alias: "fashion-hub".to_string(),
                    description: "Latest trends and timeless classics for men and women. Discover your style with our curated collection.".to_string(),
                    latitude: 10.775181,
                    longitude: 106.700806,
                    image: "/modern-fashion-store.png".to_string(),
                    thumbnail: "/fashion-boutique-storefront.png".to_string(),
                    address: Some("456 Fashion Ave, District 3, Ho Chi Minh City".to_string()),
                    created_at: "2024-01-20T14:30:00Z".to_string(),
                },
                Store {
                    id: "3".to_string(),
                    name: "Coffee Corner".to_string(),
                    alias: "coffee-corner".to_string(),
                    description: "Premium coffee and cozy atmosphere. Perfect place to work, meet friends, or just enjoy a great cup of coffee.".to_string(),
                    latitude: 10.78,
                    longitude: 106.695,
                    image: "/cozy-coffee-shop.png".to_string(),
                    thumbnail: "/cozy-coffee-shop.png".to_string(),
                    address: Some("789 Coffee Lane, District 2, Ho Chi Minh City".to_string()),
                    created_at: "2024-02-01T09:15:00Z".to_string(),
                },
            ],
        }
    }

    /// Allocates a fresh id based on the current time in milliseconds.
    ///
    /// Bumped by one while the candidate collides with an existing record, so
    /// back-to-back inserts within the same millisecond still get distinct ids.
    fn next_id(&self) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self.stores.iter().any(|s| s.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn matches(store: &Store, needle: &str) -> bool {
        store.name.to_lowercase().contains(needle)
            || store.alias.to_lowercase().contains(needle)
            || store.description.to_lowercase().contains(needle)
    }
}

impl StoreRepository for MemoryRepository {
    fn list(&self, search: &str) -> Result<Vec<Store>> {
        if search.is_empty() {
            return Ok(self.stores.clone());
        }

        let needle = search.to_lowercase();
        Ok(self
            .stores
            .iter()
            .filter(|store| Self::matches(store, &needle))
            .cloned()
            .collect())
    }

    fn get(&self, id: &str) -> Result<Store> {
        self.stores
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StorekeeperError::NotFound)
    }

    fn insert(&mut self, draft: StoreDraft) -> Result<Store> {
        let thumbnail = if draft.thumbnail.is_empty() {
            draft.image.clone()
        } else {
            draft.thumbnail
        };

        let store = Store {
            id: self.next_id(),
            name: draft.name,
            alias: draft.alias,
            description: draft.description,
            latitude: draft.latitude,
            longitude: draft.longitude,
            image: draft.image,
            thumbnail,
            address: draft.address,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.stores.insert(0, store.clone());

        tracing::debug!(store_id = %store.id, store_name = %store.name, "store inserted");

        Ok(store)
    }

    fn merge(&mut self, id: &str, patch: StorePatch) -> Result<Store> {
        let store = self
            .stores
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StorekeeperError::NotFound)?;

        store.apply(&patch);

        tracing::debug!(store_id = %id, "store merged");

        Ok(store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> StoreDraft {
        StoreDraft {
            name: name.to_string(),
            alias: "test-shop".to_string(),
            description: "A shop created inside a unit test".to_string(),
            latitude: 45.5,
            longitude: -73.6,
            image: "/test.png".to_string(),
            thumbnail: String::new(),
            address: None,
        }
    }

    #[test]
    fn empty_search_returns_all_records_in_order() {
        let repository = MemoryRepository::seeded();
        let stores = repository.list("").unwrap();
        assert_eq!(stores.len(), 3);
        assert_eq!(stores[0].name, "Tech Store Central");
        assert_eq!(stores[1].name, "Fashion Hub");
        assert_eq!(stores[2].name, "Coffee Corner");
    }

    #[test]
    fn search_matches_coffee_corner_only() {
        let repository = MemoryRepository::seeded();
        let stores = repository.list("coffee").unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].name, "Coffee Corner");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let repository = MemoryRepository::seeded();

        // name
        assert_eq!(repository.list("FASHION").unwrap().len(), 1);
        // alias
        assert_eq!(repository.list("tech-store").unwrap().len(), 1);
        // description
        assert_eq!(repository.list("CURATED collection").unwrap().len(), 1);
        // no match
        assert!(repository.list("pharmacy").unwrap().is_empty());
    }

    #[test]
    fn insert_places_record_at_the_front_with_fresh_identity() {
        let mut repository = MemoryRepository::seeded();
        let created = repository.insert(draft("Test Shop")).unwrap();

        let stores = repository.list("").unwrap();
        assert_eq!(stores.len(), 4);
        assert_eq!(stores[0].id, created.id);
        assert_eq!(stores[0].name, "Test Shop");

        assert!(chrono::DateTime::parse_from_rfc3339(&created.created_at).is_ok());
    }

    #[test]
    fn rapid_inserts_get_distinct_ids() {
        let mut repository = MemoryRepository::new();
        let a = repository.insert(draft("First")).unwrap();
        let b = repository.insert(draft("Second")).unwrap();
        let c = repository.insert(draft("Third")).unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn insert_defaults_thumbnail_to_image() {
        let mut repository = MemoryRepository::new();
        let created = repository.insert(draft("Test Shop")).unwrap();
        assert_eq!(created.thumbnail, "/test.png");
    }

    #[test]
    fn merge_preserves_unset_fields() {
        let mut repository = MemoryRepository::seeded();
        let updated = repository
            .merge(
                "2",
                StorePatch {
                    name: Some("Fashion Hub Deluxe".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Fashion Hub Deluxe");
        assert_eq!(updated.alias, "fashion-hub");
        assert_eq!(updated.created_at, "2024-01-20T14:30:00Z");
        assert!((updated.latitude - 10.775181).abs() < f64::EPSILON);

        // the change is visible on a subsequent read
        assert_eq!(repository.get("2").unwrap().name, "Fashion Hub Deluxe");
    }

    #[test]
    fn merge_unknown_id_fails_and_leaves_repository_unmodified() {
        let mut repository = MemoryRepository::seeded();
        let before = repository.list("").unwrap();

        let result = repository.merge(
            "does-not-exist",
            StorePatch {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(StorekeeperError::NotFound)));
        assert_eq!(repository.list("").unwrap(), before);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let repository = MemoryRepository::seeded();
        assert!(matches!(
            repository.get("999"),
            Err(StorekeeperError::NotFound)
        ));
    }
}
