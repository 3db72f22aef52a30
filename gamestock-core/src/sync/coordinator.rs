//! Remote operations with pessimistic reconciliation.
//!
//! The catalog is only mutated after the remote confirms. Failures leave it
//! untouched and are logged once, here.
//!
//! Several operations may be in flight at once on the same thread. No
//! `RefCell` borrow is held across an `.await`, so completions reconcile in
//! arrival order.

use std::cell::{Ref, RefCell};

use serde_json::Value;
use tracing::{debug, warn};

use super::error::{SubmitError, SyncError};
use super::remote::Remote;
use crate::entity_store::Catalog;
use crate::form::{FormController, Submission, SubmissionTarget};
use crate::models::{Draft, Entity, EntityId, EntityKind, Game, Listing, Store};

pub struct SyncCoordinator<R> {
    remote: R,
    catalog: RefCell<Catalog>,
}

impl<R: Remote> SyncCoordinator<R> {
    pub fn new(remote: R) -> Self {
        Self::with_catalog(remote, Catalog::new())
    }

    pub fn with_catalog(remote: R, catalog: Catalog) -> Self {
        Self {
            remote,
            catalog: RefCell::new(catalog),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Current snapshot. Drop the guard before awaiting another operation.
    pub fn catalog(&self) -> Ref<'_, Catalog> {
        self.catalog.borrow()
    }

    /// Fetches a full collection and replaces the local one with it.
    pub async fn activate(&self, kind: EntityKind) -> Result<usize, SyncError> {
        match kind {
            EntityKind::Games => self.load::<Game>().await,
            EntityKind::Stores => self.load::<Store>().await,
            EntityKind::Listings => self.load::<Listing>().await,
        }
    }

    /// Fetches all three collections concurrently. Collections that loaded
    /// are kept even if another one failed.
    pub async fn activate_all(&self) -> Result<(), SyncError> {
        let (games, stores, listings) = futures::join!(
            self.activate(EntityKind::Games),
            self.activate(EntityKind::Stores),
            self.activate(EntityKind::Listings),
        );
        games?;
        stores?;
        listings?;
        Ok(())
    }

    async fn load<E: Entity>(&self) -> Result<usize, SyncError> {
        let entities: Vec<E> = self
            .fetch_all()
            .await
            .map_err(|e| report("list", E::KIND, None, e))?;

        let count = entities.len();
        E::collection_mut(&mut self.catalog.borrow_mut()).replace_all(entities);
        debug!(kind = %E::KIND, count, "Loaded collection");
        Ok(count)
    }

    async fn fetch_all<E: Entity>(&self) -> Result<Vec<E>, SyncError> {
        let items = self.remote.list(E::KIND).await?;
        items.into_iter().map(decode).collect()
    }

    /// Creates an entity and upserts the server's copy.
    pub async fn create<E: Entity>(&self, draft: &Draft) -> Result<E, SyncError> {
        let payload = E::payload(draft)
            .map_err(|e| report("create", E::KIND, None, e.into()))?;
        let entity: E = self
            .remote
            .create(E::KIND, &payload)
            .await
            .and_then(decode)
            .map_err(|e| report("create", E::KIND, None, e))?;

        E::collection_mut(&mut self.catalog.borrow_mut()).upsert(entity.clone());
        debug!(kind = %E::KIND, id = entity.id(), "Reconciled created entity");
        Ok(entity)
    }

    /// Updates an entity and upserts the server's copy.
    pub async fn update<E: Entity>(&self, id: EntityId, draft: &Draft) -> Result<E, SyncError> {
        let payload = E::payload(draft)
            .map_err(|e| report("update", E::KIND, Some(id), e.into()))?;
        let entity: E = self
            .remote
            .update(E::KIND, id, &payload)
            .await
            .and_then(decode)
            .map_err(|e| report("update", E::KIND, Some(id), e))?;

        E::collection_mut(&mut self.catalog.borrow_mut()).upsert(entity.clone());
        debug!(kind = %E::KIND, id = entity.id(), "Reconciled updated entity");
        Ok(entity)
    }

    /// Deletes an entity and removes it locally once acknowledged. Returns
    /// the removed local copy, if there was one.
    pub async fn remove<E: Entity>(&self, id: EntityId) -> Result<Option<E>, SyncError> {
        self.remote
            .delete(E::KIND, id)
            .await
            .map_err(|e| report("delete", E::KIND, Some(id), e))?;

        let removed = E::collection_mut(&mut self.catalog.borrow_mut()).remove(id);
        debug!(kind = %E::KIND, id, "Reconciled deleted entity");
        Ok(removed)
    }

    /// Sends a validated submission as a create or update.
    pub async fn dispatch<E: Entity>(&self, submission: &Submission) -> Result<E, SyncError> {
        debug_assert_eq!(submission.kind, E::KIND);
        match submission.target {
            SubmissionTarget::Create => self.create(&submission.draft).await,
            SubmissionTarget::Update(id) => self.update(id, &submission.draft).await,
        }
    }

    /// Validates the form, dispatches it and reports the outcome back to it.
    ///
    /// The form may be cancelled or restarted while the request is in
    /// flight; the catalog is still reconciled, the new form is left alone.
    pub async fn submit<E: Entity>(&self, form: &RefCell<FormController>) -> Result<E, SubmitError> {
        let submission = {
            let catalog = self.catalog.borrow();
            form.borrow_mut().submit(&catalog)?
        };

        let result = self.dispatch::<E>(&submission).await;

        let mut form = form.borrow_mut();
        match result {
            Ok(entity) => {
                form.succeed(submission.ticket);
                Ok(entity)
            }
            Err(err) => {
                form.fail(submission.ticket, &err);
                Err(err.into())
            }
        }
    }
}

fn decode<E: Entity>(value: Value) -> Result<E, SyncError> {
    serde_json::from_value(value).map_err(|e| SyncError::Decode(e.to_string()))
}

fn report(operation: &str, kind: EntityKind, id: Option<EntityId>, error: SyncError) -> SyncError {
    warn!(operation, kind = %kind, id, error = %error, "Remote operation failed");
    error
}
