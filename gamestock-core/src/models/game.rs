use serde::{Deserialize, Serialize};
use std::fmt;

use super::choices::{Console, Rating};
use super::draft::{encode, Draft, DraftError};
use super::kind::EntityKind;
use super::wire::null_as_default;
use super::{Entity, EntityId};
use crate::entity_store::{Catalog, EntityStore, Identified};
use crate::projection::{Projectable, SortValue};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub console: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
}

/// Body of a game create/update request.
#[derive(Debug, Serialize)]
struct GamePayload {
    title: String,
    rating: String,
    console: String,
    genre: String,
    image: String,
}

impl Game {
    pub fn new(id: EntityId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            rating: String::new(),
            console: String::new(),
            genre: String::new(),
            image: String::new(),
        }
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = rating.into();
        self
    }

    pub fn with_console(mut self, console: impl Into<String>) -> Self {
        self.console = console.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

impl Identified for Game {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Projectable for Game {
    const SORT_KEYS: &'static [&'static str] = &["title", "genre", "console", "rating"];

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        match key {
            "title" => Some(SortValue::Text(&self.title)),
            "genre" => Some(SortValue::Text(&self.genre)),
            "console" => Some(SortValue::Text(&self.console)),
            "rating" => Some(SortValue::Text(&self.rating)),
            _ => None,
        }
    }

    fn scalar(&self, _field: &str) -> Option<f64> {
        None
    }
}

impl Entity for Game {
    const KIND: EntityKind = EntityKind::Games;

    fn to_draft(&self) -> Draft {
        Draft::empty(Self::KIND)
            .with("title", &self.title)
            .with("rating", &self.rating)
            .with("console", &self.console)
            .with("genre", &self.genre)
            .with("image", &self.image)
    }

    fn payload(draft: &Draft) -> Result<serde_json::Value, DraftError> {
        let rating: Rating = draft.parse("rating")?;
        let console: Console = draft.parse("console")?;
        let payload = GamePayload {
            title: draft.text("title"),
            rating: rating.to_string(),
            console: console.to_string(),
            genre: draft.text("genre"),
            image: draft.text("image"),
        };
        encode(&payload)
    }

    fn collection(catalog: &Catalog) -> &EntityStore<Self> {
        &catalog.games
    }

    fn collection_mut(catalog: &mut Catalog) -> &mut EntityStore<Self> {
        &mut catalog.games
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Console: {}", self.console)?;
        writeln!(f, "Rating: {}", self.rating)?;
        writeln!(f, "Genre: {}", self.genre)?;
        if !self.image.is_empty() {
            writeln!(f, "Image: {}", self.image)?;
        }
        Ok(())
    }
}
