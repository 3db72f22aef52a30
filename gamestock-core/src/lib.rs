//! Gamestock Core Library
//!
//! Entity models, draft validation, list projection, form state and remote
//! synchronization for the game/store/listing catalog.

pub mod entity_store;
pub mod form;
pub mod models;
pub mod projection;
pub mod sync;
pub mod validation;

pub use entity_store::{Catalog, EntityStore, Identified};
pub use form::{FormController, FormMode, FormState, Submission, SubmissionTarget};
pub use models::{
    Condition, Console, Draft, DraftError, Entity, EntityId, EntityKind, Game, Listing, Rating,
    Store,
};
pub use projection::{project, Filter, Projectable, SortValue};
pub use sync::{HttpRemote, Remote, SubmitError, SyncCoordinator, SyncError};
pub use validation::{validate, ValidationErrors};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
