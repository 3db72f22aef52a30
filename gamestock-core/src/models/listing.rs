use serde::{Deserialize, Serialize};
use std::fmt;

use super::choices::Condition;
use super::draft::{encode, Draft, DraftError};
use super::kind::EntityKind;
use super::wire::{lenient_float, lenient_int, lenient_opt_int, null_as_default};
use super::{Entity, EntityId};
use crate::entity_store::{Catalog, EntityStore, Identified};
use crate::projection::{Projectable, SortValue};

pub const NO_TITLE: &str = "No title available";
pub const NO_NAME: &str = "No name available";

/// Denormalized game data embedded in listing responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GameSnapshot {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// Denormalized store data embedded in listing responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A game offered by a store at a price, with condition and stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ListingRecord")]
pub struct Listing {
    pub id: EntityId,
    pub condition: String,
    pub stock: i64,
    pub price: f64,
    pub game_id: EntityId,
    pub store_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreSnapshot>,
}

/// Listing as the server sends it. Older rows name the game reference
/// `video_game_id`; `game_id` wins when both are present.
#[derive(Deserialize)]
struct ListingRecord {
    id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    condition: String,
    #[serde(default, deserialize_with = "lenient_int")]
    stock: i64,
    #[serde(default, deserialize_with = "lenient_float")]
    price: f64,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    game_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    video_game_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient_int")]
    store_id: EntityId,
    #[serde(default)]
    game: Option<GameSnapshot>,
    #[serde(default)]
    store: Option<StoreSnapshot>,
}

impl From<ListingRecord> for Listing {
    fn from(record: ListingRecord) -> Self {
        Self {
            id: record.id,
            condition: record.condition,
            stock: record.stock,
            price: record.price,
            game_id: record.game_id.or(record.video_game_id).unwrap_or_default(),
            store_id: record.store_id,
            game: record.game,
            store: record.store,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListingPayload {
    condition: String,
    stock: i64,
    price: f64,
    game_id: EntityId,
    store_id: EntityId,
}

impl Listing {
    pub fn new(id: EntityId, game_id: EntityId, store_id: EntityId) -> Self {
        Self {
            id,
            condition: String::new(),
            stock: 0,
            price: 0.0,
            game_id,
            store_id,
            game: None,
            store: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_game(mut self, title: impl Into<String>) -> Self {
        self.game = Some(GameSnapshot {
            id: Some(self.game_id),
            title: title.into(),
        });
        self
    }

    pub fn with_store(mut self, name: impl Into<String>) -> Self {
        self.store = Some(StoreSnapshot {
            id: Some(self.store_id),
            name: name.into(),
        });
        self
    }

    /// Title of the listed game, or a placeholder when the snapshot is missing.
    pub fn game_title(&self) -> &str {
        match &self.game {
            Some(game) if !game.title.is_empty() => &game.title,
            _ => NO_TITLE,
        }
    }

    /// Name of the selling store, or a placeholder when the snapshot is missing.
    pub fn store_name(&self) -> &str {
        match &self.store {
            Some(store) if !store.name.is_empty() => &store.name,
            _ => NO_NAME,
        }
    }
}

impl Identified for Listing {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Projectable for Listing {
    const SORT_KEYS: &'static [&'static str] = &["price", "stock", "condition", "game", "store"];

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        match key {
            "price" => Some(SortValue::Number(self.price)),
            "stock" => Some(SortValue::Number(self.stock as f64)),
            "condition" => Some(SortValue::Text(&self.condition)),
            "game" => Some(SortValue::Text(self.game_title())),
            "store" => Some(SortValue::Text(self.store_name())),
            _ => None,
        }
    }

    fn scalar(&self, field: &str) -> Option<f64> {
        match field {
            "price" => Some(self.price),
            "stock" => Some(self.stock as f64),
            _ => None,
        }
    }
}

impl Entity for Listing {
    const KIND: EntityKind = EntityKind::Listings;

    fn to_draft(&self) -> Draft {
        Draft::empty(Self::KIND)
            .with("condition", &self.condition)
            .with("stock", self.stock.to_string())
            .with("price", self.price.to_string())
            .with("game_id", self.game_id.to_string())
            .with("store_id", self.store_id.to_string())
    }

    fn payload(draft: &Draft) -> Result<serde_json::Value, DraftError> {
        let condition: Condition = draft.parse("condition")?;
        let payload = ListingPayload {
            condition: condition.to_string(),
            stock: draft.parse("stock")?,
            price: draft.parse("price")?,
            game_id: draft.parse("game_id")?,
            store_id: draft.parse("store_id")?,
        };
        encode(&payload)
    }

    fn collection(catalog: &Catalog) -> &EntityStore<Self> {
        &catalog.listings
    }

    fn collection_mut(catalog: &mut Catalog) -> &mut EntityStore<Self> {
        &mut catalog.listings
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = format!("Listing {}", self.id);
        writeln!(f, "{}", heading)?;
        writeln!(f, "{}", "=".repeat(heading.len()))?;
        writeln!(f, "Game: {} (#{})", self.game_title(), self.game_id)?;
        writeln!(f, "Store: {} (#{})", self.store_name(), self.store_id)?;
        writeln!(f, "Condition: {}", self.condition)?;
        writeln!(f, "Price: ${:.2}", self.price)?;
        writeln!(f, "Stock: {}", self.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_server_listing_with_snapshots() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "id": 4, "price": 24.5, "stock": "12", "condition": "Used",
                "game_id": 1, "store_id": 2,
                "game": {"id": 1, "title": "Donkey Kong", "console": "Nintendo Switch"},
                "store": {"id": 2, "name": "Best Buy", "location": "3 Mill Creek Dr"}
            }"#,
        )
        .unwrap();
        assert_eq!(listing.stock, 12);
        assert_eq!(listing.game_title(), "Donkey Kong");
        assert_eq!(listing.store_name(), "Best Buy");
    }

    #[test]
    fn test_missing_snapshots_fall_back() {
        let listing: Listing =
            serde_json::from_str(r#"{"id": 5, "price": 9.99, "stock": 3, "condition": "New", "video_game_id": 7, "store_id": 1}"#)
                .unwrap();
        assert_eq!(listing.game_id, 7);
        assert_eq!(listing.game_title(), NO_TITLE);
        assert_eq!(listing.store_name(), NO_NAME);
    }

    #[test]
    fn test_game_id_preferred_over_legacy_key() {
        let listing: Listing = serde_json::from_str(
            r#"{"id": 6, "game_id": 1, "video_game_id": 9, "store_id": 2, "stock": "4"}"#,
        )
        .unwrap();
        assert_eq!(listing.game_id, 1);
        assert_eq!(listing.stock, 4);

        let listing: Listing =
            serde_json::from_str(r#"{"id": 6, "game_id": null, "video_game_id": "9"}"#).unwrap();
        assert_eq!(listing.game_id, 9);
    }

    #[test]
    fn test_serializes_without_legacy_key() {
        let value = serde_json::to_value(Listing::new(6, 1, 2)).unwrap();
        assert_eq!(value["game_id"], 1);
        assert!(value.get("video_game_id").is_none());
        assert!(value.get("game").is_none());
    }

    #[test]
    fn test_payload_types_fields() {
        let draft = Draft::empty(EntityKind::Listings)
            .with("condition", "used")
            .with("stock", "40")
            .with("price", "19.99")
            .with("game_id", "1")
            .with("store_id", "2");
        let payload = Listing::payload(&draft).unwrap();
        assert_eq!(payload["condition"], "Used");
        assert_eq!(payload["stock"], 40);
        assert_eq!(payload["price"], 19.99);
        assert_eq!(payload["store_id"], 2);
    }

    #[test]
    fn test_payload_rejects_non_numeric_stock() {
        let draft = Listing::new(1, 1, 1)
            .with_condition("New")
            .to_draft()
            .with("stock", "plenty");
        assert!(Listing::payload(&draft).is_err());
    }

    #[test]
    fn test_listing_display() {
        let listing = Listing::new(3, 1, 2)
            .with_condition("New")
            .with_price(29.5)
            .with_stock(8)
            .with_game("Halo");
        let output = format!("{}", listing);
        assert!(output.contains("Game: Halo (#1)"));
        assert!(output.contains("Store: No name available (#2)"));
        assert!(output.contains("Price: $29.50"));
    }
}
