//! Draft validation.
//!
//! `validate` is pure: the only outside state it reads is the catalog
//! snapshot passed in for foreign-key checks.

mod rules;

pub use rules::{rules_for, Check, FieldRules, Pattern, Rule};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::entity_store::Catalog;
use crate::models::{Draft, EntityKind};

/// Field name to the first failing check's message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keeps only the errors for which `keep` returns true.
    pub fn retain(mut self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.errors.retain(|field, _| keep(field));
        self
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Runs every field's checks in order; the first failure per field wins.
pub fn validate(kind: EntityKind, draft: &Draft, catalog: &Catalog) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    for (field, rules) in rules_for(kind) {
        let value = draft.get(field).trim();
        if let Some(failed) = rules.iter().find(|r| !r.check.passes(value, catalog)) {
            errors.insert(field, failed.message);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entity, Game, Listing, Store};

    fn catalog_with_refs() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.games.upsert(Game::new(1, "Mega Man"));
        catalog
            .stores
            .upsert(Store::new(2, "GameStop", "640 Camino Del Rio N", "9:00 - 21:00"));
        catalog
    }

    fn valid_listing() -> Draft {
        Draft::empty(EntityKind::Listings)
            .with("condition", "new")
            .with("stock", "10")
            .with("price", "24.99")
            .with("game_id", "1")
            .with("store_id", "2")
    }

    #[test]
    fn test_empty_draft_yields_one_error_per_field() {
        let catalog = Catalog::new();
        for kind in EntityKind::ALL {
            let errors = validate(kind, &Draft::empty(kind), &catalog);
            assert!(!errors.is_valid());
            assert_eq!(errors.len(), kind.fields().len());
            for field in kind.fields() {
                assert!(errors.get(field).unwrap().contains("required"), "{}", field);
            }
        }
    }

    #[test]
    fn test_halo_game_is_valid() {
        let draft = Draft::empty(EntityKind::Games)
            .with("title", "Halo")
            .with("rating", "m")
            .with("console", "xbox")
            .with("genre", "FPS")
            .with("image", "http://x/y.png");
        assert!(validate(EntityKind::Games, &draft, &Catalog::new()).is_valid());
    }

    #[test]
    fn test_console_is_case_insensitive() {
        let base = Draft::empty(EntityKind::Games)
            .with("title", "Halo")
            .with("rating", "M")
            .with("genre", "FPS")
            .with("image", "http://x/y.png");
        let upper = validate(EntityKind::Games, &base.clone().with("console", "XBOX"), &Catalog::new());
        let lower = validate(EntityKind::Games, &base.with("console", "xbox"), &Catalog::new());
        assert!(upper.is_valid());
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_first_failing_check_wins() {
        let draft = Draft::empty(EntityKind::Games).with("title", "H");
        let errors = validate(EntityKind::Games, &draft, &Catalog::new());
        assert_eq!(errors.get("title"), Some("Title must be at least 2 characters"));

        let long = "x".repeat(61);
        let draft = Draft::empty(EntityKind::Games).with("title", long);
        let errors = validate(EntityKind::Games, &draft, &Catalog::new());
        assert_eq!(errors.get("title"), Some("Title must be less than 60 characters"));
    }

    #[test]
    fn test_fields_are_independent() {
        let draft = Draft::empty(EntityKind::Games)
            .with("title", "Halo")
            .with("rating", "AO");
        let errors = validate(EntityKind::Games, &draft, &Catalog::new());
        assert!(errors.get("title").is_none());
        assert_eq!(errors.get("rating"), Some("Rating must be either E, T, or M"));
        assert_eq!(errors.get("console"), Some("Console is required"));
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let draft = Draft::empty(EntityKind::Stores).with("name", "   ");
        let errors = validate(EntityKind::Stores, &draft, &Catalog::new());
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn test_store_rules() {
        let draft = Draft::empty(EntityKind::Stores)
            .with("name", "Gaming Odyssey")
            .with("location", "Skyline Blvd")
            .with("hours", "8am - 6pm");
        let errors = validate(EntityKind::Stores, &draft, &Catalog::new());
        assert_eq!(
            errors.get("location"),
            Some("Location must include a street number and name")
        );
        assert_eq!(errors.get("hours"), Some("Hours must look like 9:00 - 21:00"));

        let fixed = draft
            .with("location", "1400 Skyline Blvd")
            .with("hours", "8:00 - 18:00");
        assert!(validate(EntityKind::Stores, &fixed, &Catalog::new()).is_valid());
    }

    #[test]
    fn test_valid_listing_against_catalog() {
        let errors = validate(EntityKind::Listings, &valid_listing(), &catalog_with_refs());
        assert!(errors.is_valid(), "{}", errors);
    }

    #[test]
    fn test_stock_out_of_range() {
        let listing = Listing::new(3, 1, 2)
            .with_condition("Used")
            .with_price(12.0)
            .with_stock(5);
        let draft = listing.to_draft().with("stock", "150");
        let errors = validate(EntityKind::Listings, &draft, &catalog_with_refs());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("stock"), Some("Stock must be between 0 and 100"));
    }

    #[test]
    fn test_stock_must_be_whole() {
        let draft = valid_listing().with("stock", "2.5");
        let errors = validate(EntityKind::Listings, &draft, &catalog_with_refs());
        assert_eq!(errors.get("stock"), Some("Stock must be a whole number"));
    }

    #[test]
    fn test_price_must_be_positive() {
        let catalog = catalog_with_refs();
        let zero = validate(EntityKind::Listings, &valid_listing().with("price", "0"), &catalog);
        assert_eq!(zero.get("price"), Some("Price must be greater than 0"));
        let text = validate(EntityKind::Listings, &valid_listing().with("price", "cheap"), &catalog);
        assert_eq!(text.get("price"), Some("Price must be a number"));
    }

    #[test]
    fn test_stale_reference_is_a_validation_error() {
        let draft = valid_listing().with("game_id", "99").with("store_id", "-2");
        let errors = validate(EntityKind::Listings, &draft, &catalog_with_refs());
        assert_eq!(errors.get("game_id"), Some("Selected game does not exist"));
        assert_eq!(errors.get("store_id"), Some("Store ID must be positive"));
    }

    #[test]
    fn test_retain_and_display() {
        let errors = validate(EntityKind::Stores, &Draft::empty(EntityKind::Stores), &Catalog::new());
        let only_name = errors.retain(|field| field == "name");
        assert_eq!(only_name.len(), 1);
        assert_eq!(only_name.to_string(), "name: Name is required");
    }
}
