use serde::{Deserialize, Serialize};
use std::fmt;

use super::draft::{encode, Draft, DraftError};
use super::kind::EntityKind;
use super::wire::null_as_default;
use super::{Entity, EntityId};
use crate::entity_store::{Catalog, EntityStore, Identified};
use crate::projection::{Projectable, SortValue};

/// A physical shop that carries listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours: String,
}

#[derive(Debug, Serialize)]
struct StorePayload {
    name: String,
    location: String,
    hours: String,
}

impl Store {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        location: impl Into<String>,
        hours: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            hours: hours.into(),
        }
    }
}

impl Identified for Store {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Projectable for Store {
    const SORT_KEYS: &'static [&'static str] = &["name", "location"];

    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        match key {
            "name" => Some(SortValue::Text(&self.name)),
            "location" => Some(SortValue::Text(&self.location)),
            _ => None,
        }
    }

    fn scalar(&self, _field: &str) -> Option<f64> {
        None
    }
}

impl Entity for Store {
    const KIND: EntityKind = EntityKind::Stores;

    fn to_draft(&self) -> Draft {
        Draft::empty(Self::KIND)
            .with("name", &self.name)
            .with("location", &self.location)
            .with("hours", &self.hours)
    }

    fn payload(draft: &Draft) -> Result<serde_json::Value, DraftError> {
        let payload = StorePayload {
            name: draft.text("name"),
            location: draft.text("location"),
            hours: draft.text("hours"),
        };
        encode(&payload)
    }

    fn collection(catalog: &Catalog) -> &EntityStore<Self> {
        &catalog.stores
    }

    fn collection_mut(catalog: &mut Catalog) -> &mut EntityStore<Self> {
        &mut catalog.stores
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Hours: {}", self.hours)
    }
}
