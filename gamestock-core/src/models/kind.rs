//! Entity kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three catalog collections managed by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Games,
    Stores,
    Listings,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Games, EntityKind::Stores, EntityKind::Listings];

    /// Returns the remote collection name (URL path segment).
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Games => "games",
            EntityKind::Stores => "stores",
            EntityKind::Listings => "listings",
        }
    }

    /// Returns the singular noun used in messages.
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Games => "game",
            EntityKind::Stores => "store",
            EntityKind::Listings => "listing",
        }
    }

    /// Editable field names, in form order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Games => &["title", "rating", "console", "genre", "image"],
            EntityKind::Stores => &["name", "location", "hours"],
            EntityKind::Listings => &["condition", "stock", "price", "game_id", "store_id"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "game" | "games" => Ok(EntityKind::Games),
            "store" | "stores" => Ok(EntityKind::Stores),
            "listing" | "listings" => Ok(EntityKind::Listings),
            _ => Err(format!(
                "Invalid entity kind '{}'. Valid options: games, stores, listings",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(EntityKind::Games.collection(), "games");
        assert_eq!(EntityKind::Stores.collection(), "stores");
        assert_eq!(EntityKind::Listings.collection(), "listings");
    }

    #[test]
    fn test_from_str_accepts_singular_and_plural() {
        assert_eq!("Game".parse::<EntityKind>().unwrap(), EntityKind::Games);
        assert_eq!("STORES".parse::<EntityKind>().unwrap(), EntityKind::Stores);
        assert_eq!("listing".parse::<EntityKind>().unwrap(), EntityKind::Listings);
        assert!("consoles".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_fields_per_kind() {
        assert_eq!(EntityKind::Games.fields().len(), 5);
        assert_eq!(EntityKind::Stores.fields(), &["name", "location", "hours"]);
        assert!(EntityKind::Listings.fields().contains(&"game_id"));
    }
}
