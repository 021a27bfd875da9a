//! Form state, field focus, and synchronous validation.
//!
//! This module holds the editable buffer behind the add and edit screens. All
//! fields are kept as strings while editing; validation parses and checks them
//! on submit, and only a form that validates cleanly produces a draft or patch
//! for the worker. Validation failures never leave the form.

use crate::domain::{Store, StoreDraft, StorePatch};
use std::collections::BTreeMap;

/// Identifies one editable field of the store form.
///
/// The declaration order is the visual order on screen and the Tab traversal
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Alias,
    Description,
    Latitude,
    Longitude,
    Address,
    Image,
    Thumbnail,
}

impl FormField {
    /// All fields in traversal order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Alias,
        Self::Description,
        Self::Latitude,
        Self::Longitude,
        Self::Address,
        Self::Image,
        Self::Thumbnail,
    ];

    /// Human-readable label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Alias => "Alias",
            Self::Description => "Description",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::Address => "Address",
            Self::Image => "Image URL",
            Self::Thumbnail => "Thumbnail URL",
        }
    }

    /// The field after this one, wrapping to the first.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The field before this one, wrapping to the last.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Editable buffer for the add and edit forms.
///
/// Field values are raw strings; numeric fields are parsed during validation.
/// `errors` maps fields to their current validation message and is rebuilt on
/// every submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub alias: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    pub image: String,
    pub thumbnail: String,

    /// Field that receives character input.
    pub focused: Option<FormField>,

    /// Validation messages from the last submit attempt.
    pub errors: BTreeMap<FormField, String>,
}

impl FormState {
    /// Creates an empty form with focus on the name field.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            focused: Some(FormField::Name),
            ..Self::default()
        }
    }

    /// Creates a form pre-filled from an existing store.
    #[must_use]
    pub fn from_store(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            alias: store.alias.clone(),
            description: store.description.clone(),
            latitude: store.latitude.to_string(),
            longitude: store.longitude.to_string(),
            address: store.address.clone().unwrap_or_default(),
            image: store.image.clone(),
            thumbnail: store.thumbnail.clone(),
            focused: Some(FormField::Name),
            errors: BTreeMap::new(),
        }
    }

    /// Moves focus to the next field.
    pub fn focus_next(&mut self) {
        self.focused = Some(self.focused.map_or(FormField::Name, FormField::next));
    }

    /// Moves focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focused = Some(self.focused.map_or(FormField::Name, FormField::prev));
    }

    /// Returns a mutable reference to the buffer of the focused field.
    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focused? {
            FormField::Name => Some(&mut self.name),
            FormField::Alias => Some(&mut self.alias),
            FormField::Description => Some(&mut self.description),
            FormField::Latitude => Some(&mut self.latitude),
            FormField::Longitude => Some(&mut self.longitude),
            FormField::Address => Some(&mut self.address),
            FormField::Image => Some(&mut self.image),
            FormField::Thumbnail => Some(&mut self.thumbnail),
        }
    }

    /// Returns the current value of a field.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Alias => &self.alias,
            FormField::Description => &self.description,
            FormField::Latitude => &self.latitude,
            FormField::Longitude => &self.longitude,
            FormField::Address => &self.address,
            FormField::Image => &self.image,
            FormField::Thumbnail => &self.thumbnail,
        }
    }

    /// Appends a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.push(c);
        }
    }

    /// Removes the last character from the focused field.
    pub fn pop_char(&mut self) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.pop();
        }
    }

    /// Fills the alias field from the current name.
    pub fn generate_alias(&mut self) {
        self.alias = generate_alias(&self.name);
    }

    /// Validates every field and rebuilds the error map.
    ///
    /// Returns `true` when the form is submittable.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "Name is required".to_string());
        } else if name.chars().count() < 2 {
            errors.insert(
                FormField::Name,
                "Name must be at least 2 characters".to_string(),
            );
        }

        let alias = self.alias.trim();
        if alias.is_empty() {
            errors.insert(FormField::Alias, "Alias is required".to_string());
        } else if !alias
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            errors.insert(
                FormField::Alias,
                "Alias must contain only lowercase letters, numbers, and hyphens".to_string(),
            );
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(FormField::Description, "Description is required".to_string());
        } else if description.chars().count() < 10 {
            errors.insert(
                FormField::Description,
                "Description must be at least 10 characters".to_string(),
            );
        }

        match self.latitude.trim().parse::<f64>() {
            Ok(lat) if (-90.0..=90.0).contains(&lat) => {}
            _ => {
                errors.insert(
                    FormField::Latitude,
                    "Latitude must be a number between -90 and 90".to_string(),
                );
            }
        }

        match self.longitude.trim().parse::<f64>() {
            Ok(lng) if (-180.0..=180.0).contains(&lng) => {}
            _ => {
                errors.insert(
                    FormField::Longitude,
                    "Longitude must be a number between -180 and 180".to_string(),
                );
            }
        }

        if self.image.trim().is_empty() {
            errors.insert(FormField::Image, "Image URL is required".to_string());
        }

        let is_valid = errors.is_empty();
        self.errors = errors;
        is_valid
    }

    /// Validates and, on success, builds the creation payload.
    ///
    /// The thumbnail falls back to the image URL when left empty. Returns
    /// `None` when validation fails; the error map is populated either way.
    pub fn validated_draft(&mut self) -> Option<StoreDraft> {
        if !self.validate() {
            return None;
        }

        let image = self.image.trim().to_string();
        let thumbnail = if self.thumbnail.trim().is_empty() {
            image.clone()
        } else {
            self.thumbnail.trim().to_string()
        };
        let address = self.address.trim();

        Some(StoreDraft {
            name: self.name.trim().to_string(),
            alias: self.alias.trim().to_string(),
            description: self.description.trim().to_string(),
            latitude: self.latitude.trim().parse().ok()?,
            longitude: self.longitude.trim().parse().ok()?,
            image,
            thumbnail,
            address: if address.is_empty() {
                None
            } else {
                Some(address.to_string())
            },
        })
    }

    /// Validates and, on success, builds the update payload.
    ///
    /// The patch carries every form field, so submitting an unchanged form is
    /// an idempotent merge.
    pub fn validated_patch(&mut self) -> Option<StorePatch> {
        let draft = self.validated_draft()?;

        Some(StorePatch {
            name: Some(draft.name),
            alias: Some(draft.alias),
            description: Some(draft.description),
            latitude: Some(draft.latitude),
            longitude: Some(draft.longitude),
            image: Some(draft.image),
            thumbnail: Some(draft.thumbnail),
            address: draft.address,
        })
    }
}

/// Derives a URL-friendly alias from a store name.
///
/// Lowercases, drops everything except letters, digits, spaces, and hyphens,
/// then collapses whitespace runs and hyphen runs into single hyphens.
///
/// # Examples
///
/// ```
/// use storekeeper::app::form::generate_alias;
///
/// assert_eq!(generate_alias("My Store!"), "my-store");
/// assert_eq!(generate_alias("  Coffee   Corner  "), "coffee-corner");
/// ```
#[must_use]
pub fn generate_alias(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ' || *c == '-')
        .collect();

    let mut alias = String::with_capacity(cleaned.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for c in cleaned.trim().chars() {
        if c == ' ' || c == '-' {
            if !last_was_hyphen {
                alias.push('-');
                last_was_hyphen = true;
            }
        } else {
            alias.push(c);
            last_was_hyphen = false;
        }
    }
    if alias.ends_with('-') {
        alias.pop();
    }
    alias
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormState {
        FormState {
            name: "Test Shop".to_string(),
            alias: "test-shop".to_string(),
            description: "A perfectly ordinary test shop".to_string(),
            latitude: "45.5".to_string(),
            longitude: "-73.6".to_string(),
            address: String::new(),
            image: "/test.png".to_string(),
            thumbnail: String::new(),
            focused: Some(FormField::Name),
            errors: BTreeMap::new(),
        }
    }

    #[test]
    fn valid_form_produces_a_draft() {
        let mut form = valid_form();
        let draft = form.validated_draft().expect("form should validate");
        assert_eq!(draft.name, "Test Shop");
        assert!((draft.latitude - 45.5).abs() < f64::EPSILON);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn alias_with_punctuation_is_rejected() {
        let mut form = valid_form();
        form.alias = "My Store!".to_string();
        assert!(form.validated_draft().is_none());
        assert!(form.errors.contains_key(&FormField::Alias));
    }

    #[test]
    fn hyphenated_lowercase_alias_is_accepted() {
        let mut form = valid_form();
        form.alias = "my-store-1".to_string();
        assert!(form.validated_draft().is_some());
    }

    #[test]
    fn latitude_out_of_range_is_rejected() {
        let mut form = valid_form();
        form.latitude = "91".to_string();
        assert!(form.validated_draft().is_none());
        assert!(form.errors.contains_key(&FormField::Latitude));

        form.latitude = "45.5".to_string();
        assert!(form.validated_draft().is_some());
    }

    #[test]
    fn longitude_out_of_range_is_rejected() {
        let mut form = valid_form();
        form.longitude = "181".to_string();
        assert!(form.validated_draft().is_none());
        assert!(form.errors.contains_key(&FormField::Longitude));
    }

    #[test]
    fn short_description_is_rejected() {
        let mut form = valid_form();
        form.description = "too short".to_string();
        assert!(form.validated_draft().is_none());
        assert_eq!(
            form.errors.get(&FormField::Description).map(String::as_str),
            Some("Description must be at least 10 characters")
        );
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let mut form = FormState::empty();
        assert!(!form.validate());
        assert!(form.errors.contains_key(&FormField::Name));
        assert!(form.errors.contains_key(&FormField::Alias));
        assert!(form.errors.contains_key(&FormField::Description));
        assert!(form.errors.contains_key(&FormField::Latitude));
        assert!(form.errors.contains_key(&FormField::Longitude));
        assert!(form.errors.contains_key(&FormField::Image));
    }

    #[test]
    fn thumbnail_defaults_to_image_in_draft() {
        let mut form = valid_form();
        let draft = form.validated_draft().unwrap();
        assert_eq!(draft.thumbnail, "/test.png");
    }

    #[test]
    fn patch_carries_every_field() {
        let mut form = valid_form();
        form.address = "10 Test Road".to_string();
        let patch = form.validated_patch().unwrap();
        assert_eq!(patch.name.as_deref(), Some("Test Shop"));
        assert_eq!(patch.address.as_deref(), Some("10 Test Road"));
        assert!(patch.latitude.is_some());
        assert!(patch.thumbnail.is_some());
    }

    #[test]
    fn generate_alias_slugifies() {
        assert_eq!(generate_alias("My Store!"), "my-store");
        assert_eq!(generate_alias("Coffee   Corner"), "coffee-corner");
        assert_eq!(generate_alias("Already-Hyphenated Name"), "already-hyphenated-name");
        assert_eq!(generate_alias("Shop #42 (Downtown)"), "shop-42-downtown");
        assert_eq!(generate_alias("   "), "");
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = FormState::empty();
        assert_eq!(form.focused, Some(FormField::Name));
        form.focus_prev();
        assert_eq!(form.focused, Some(FormField::Thumbnail));
        form.focus_next();
        assert_eq!(form.focused, Some(FormField::Name));
    }

    #[test]
    fn character_input_edits_the_focused_field() {
        let mut form = FormState::empty();
        form.focused = Some(FormField::Latitude);
        form.push_char('4');
        form.push_char('5');
        form.push_char('9');
        form.pop_char();
        assert_eq!(form.latitude, "45");
        assert!(form.name.is_empty());
    }

    #[test]
    fn from_store_round_trips_the_editable_fields() {
        let store = Store {
            id: "7".to_string(),
            name: "Round Trip".to_string(),
            alias: "round-trip".to_string(),
            description: "Fields come back out unchanged".to_string(),
            latitude: 10.78,
            longitude: 106.695,
            image: "/a.png".to_string(),
            thumbnail: "/b.png".to_string(),
            address: None,
            created_at: "2024-02-01T09:15:00Z".to_string(),
        };

        let mut form = FormState::from_store(&store);
        let patch = form.validated_patch().unwrap();
        assert_eq!(patch.name.as_deref(), Some("Round Trip"));
        assert_eq!(patch.thumbnail.as_deref(), Some("/b.png"));
        assert_eq!(patch.address, None);
    }
}
