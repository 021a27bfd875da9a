//! Store domain model and operations.
//!
//! This module defines the core `Store` type representing a physical store
//! location record, along with the `StoreDraft` input type used when creating
//! new records and the `StorePatch` type used for partial updates.

use serde::{Deserialize, Serialize};

/// A store location record.
///
/// Stores carry identity fields (`id`, `created_at`) that are assigned once by
/// the repository at creation time and never change afterwards. All remaining
/// fields are user-editable through the form views.
///
/// # Fields
///
/// - `id`: Opaque repository-assigned identifier
/// - `name`: Display name of the store
/// - `alias`: URL-friendly slug (lowercase letters, digits, hyphens)
/// - `description`: Free-form description text
/// - `latitude` / `longitude`: Geocoordinates in decimal degrees
/// - `image` / `thumbnail`: Image URLs (thumbnail falls back to image)
/// - `address`: Optional street address
/// - `created_at`: RFC 3339 creation timestamp, immutable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: String,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: String,
}

impl Store {
    /// Applies a partial update to this store in place.
    ///
    /// Only fields present in the patch are overwritten. `id` and `created_at`
    /// are never touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use storekeeper::domain::{Store, StorePatch};
    ///
    /// let mut store = Store {
    ///     id: "1".to_string(),
    ///     name: "Old Name".to_string(),
    ///     alias: "old-name".to_string(),
    ///     description: "A description of the store".to_string(),
    ///     latitude: 10.0,
    ///     longitude: 106.0,
    ///     image: "/img.png".to_string(),
    ///     thumbnail: "/img.png".to_string(),
    ///     address: None,
    ///     created_at: "2024-01-01T00:00:00Z".to_string(),
    /// };
    ///
    /// store.apply(&StorePatch { name: Some("New Name".to_string()), ..Default::default() });
    /// assert_eq!(store.name, "New Name");
    /// assert_eq!(store.alias, "old-name");
    /// ```
    pub fn apply(&mut self, patch: &StorePatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(alias) = &patch.alias {
            self.alias.clone_from(alias);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if let Some(image) = &patch.image {
            self.image.clone_from(image);
        }
        if let Some(thumbnail) = &patch.thumbnail {
            self.thumbnail.clone_from(thumbnail);
        }
        if let Some(address) = &patch.address {
            self.address = Some(address.clone());
        }
    }
}

/// Input payload for creating a new store.
///
/// Carries every user-editable field of a [`Store`]. The repository assigns
/// `id` and `created_at` when the draft is inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDraft {
    pub name: String,
    pub alias: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: String,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial update payload for an existing store.
///
/// Every field is optional. Fields left as `None` keep their current value
/// when the patch is merged by the repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> Store {
        Store {
            id: "42".to_string(),
            name: "Sample Store".to_string(),
            alias: "sample-store".to_string(),
            description: "A store used in unit tests".to_string(),
            latitude: 10.762622,
            longitude: 106.660172,
            image: "/sample.png".to_string(),
            thumbnail: "/sample-thumb.png".to_string(),
            address: Some("123 Sample Street".to_string()),
            created_at: "2024-01-15T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut store = sample_store();
        store.apply(&StorePatch {
            name: Some("Renamed".to_string()),
            latitude: Some(11.0),
            ..Default::default()
        });

        assert_eq!(store.name, "Renamed");
        assert!((store.latitude - 11.0).abs() < f64::EPSILON);
        assert_eq!(store.alias, "sample-store");
        assert_eq!(store.description, "A store used in unit tests");
        assert_eq!(store.address.as_deref(), Some("123 Sample Street"));
    }

    #[test]
    fn apply_never_touches_identity_fields() {
        let mut store = sample_store();
        store.apply(&StorePatch {
            name: Some("Other".to_string()),
            ..Default::default()
        });

        assert_eq!(store.id, "42");
        assert_eq!(store.created_at, "2024-01-15T10:00:00Z");
    }

    #[test]
    fn empty_patch_is_a_noop() {
        let mut store = sample_store();
        let before = store.clone();
        store.apply(&StorePatch::default());
        assert_eq!(store, before);
    }

    #[test]
    fn patch_round_trips_through_json() {
        let patch = StorePatch {
            alias: Some("new-alias".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert!(!json.contains("latitude"));
        let back: StorePatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patch);
    }
}
