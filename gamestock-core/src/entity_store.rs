//! In-memory canonical collections, one per entity kind.
//!
//! The store holds server-confirmed state only. It never validates and never
//! fails; callers decide when a mutation is warranted.

use crate::models::{EntityId, EntityKind, Game, Listing, Store};

/// Anything with a server-assigned identity.
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// Ordered collection keyed by identity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<E> {
    entries: Vec<E>,
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Identified> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection. Later duplicates of an identity replace
    /// earlier ones in place so identities stay unique.
    pub fn replace_all(&mut self, entities: impl IntoIterator<Item = E>) {
        self.entries.clear();
        for entity in entities {
            self.upsert(entity);
        }
    }

    /// Inserts at the end if the identity is absent, otherwise replaces the
    /// existing entry at its current position.
    pub fn upsert(&mut self, entity: E) {
        let id = entity.id();
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(existing) => *existing = entity,
            None => self.entries.push(entity),
        }
    }

    /// Removes the entry with `id`, returning it if it was present.
    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    /// Current snapshot, in insertion order.
    pub fn snapshot(&self) -> &[E] {
        &self.entries
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three collections of the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub games: EntityStore<Game>,
    pub stores: EntityStore<Store>,
    pub listings: EntityStore<Listing>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an identity of `kind` is present in the current snapshot.
    pub fn contains(&self, kind: EntityKind, id: EntityId) -> bool {
        match kind {
            EntityKind::Games => self.games.contains(id),
            EntityKind::Stores => self.stores.contains(id),
            EntityKind::Listings => self.listings.contains(id),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Games => self.games.len(),
            EntityKind::Stores => self.stores.len(),
            EntityKind::Listings => self.listings.len(),
        }
    }
}
