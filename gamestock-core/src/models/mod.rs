mod choices;
mod draft;
mod game;
mod kind;
mod listing;
mod store;
mod wire;

pub use choices::{Condition, Console, Rating};
pub use draft::{Draft, DraftError};
pub use game::Game;
pub use kind::EntityKind;
pub use listing::{GameSnapshot, Listing, StoreSnapshot, NO_NAME, NO_TITLE};
pub use store::Store;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entity_store::{Catalog, EntityStore, Identified};
use crate::projection::Projectable;

/// Server-assigned identity.
pub type EntityId = i64;

/// A catalog record kind. Each implementation supplies the per-kind pieces
/// the generic form and sync logic need.
pub trait Entity: Identified + Projectable + Clone + Serialize + DeserializeOwned + 'static {
    const KIND: EntityKind;

    /// Copies the editable fields into a fresh draft.
    fn to_draft(&self) -> Draft;

    /// Builds the create/update request body from a validated draft.
    fn payload(draft: &Draft) -> Result<serde_json::Value, DraftError>;

    fn collection(catalog: &Catalog) -> &EntityStore<Self>;

    fn collection_mut(catalog: &mut Catalog) -> &mut EntityStore<Self>;
}
