//! Entity lists: the canonical, ordered collection a modal commits into.
//!
//! Ids are unique within a list and insertion order is display order.
//! Whether a committed draft carries an id decides between create and
//! update.

use crate::error::{EditorError, Result};
use crate::kind::EntityKind;
use crate::types::EntityId;
use draft_editor_core::environment::{IdGenerator, SaveHandler};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered collection of entities of kind `K`
pub struct EntityList<K: EntityKind> {
    entries: Vec<K::Draft>,
    ids: Arc<dyn IdGenerator>,
}

impl<K: EntityKind> EntityList<K> {
    /// An empty list drawing fresh ids from `ids`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            entries: Vec::new(),
            ids,
        }
    }

    /// Append `draft` under a freshly generated id
    ///
    /// Any id already on the draft is replaced.
    pub fn create(&mut self, mut draft: K::Draft) -> EntityId {
        let id = EntityId::from_uuid(self.ids.next_id());
        K::assign_id(&mut draft, id);
        self.entries.push(draft);
        tracing::info!(kind = K::NAME, %id, total = self.entries.len(), "Entity created");
        id
    }

    /// Replace the entity with `id` in place
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if no entity has this id.
    pub fn update(&mut self, id: EntityId, mut draft: K::Draft) -> Result<()> {
        let slot = self
            .entries
            .iter_mut()
            .find(|entry| K::draft_id(entry) == Some(id))
            .ok_or(EditorError::NotFound { kind: K::NAME, id })?;
        K::assign_id(&mut draft, id);
        *slot = draft;
        tracing::info!(kind = K::NAME, %id, "Entity updated");
        Ok(())
    }

    /// Create or update, depending on whether `draft` carries an id
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] for an update of an unknown id.
    pub fn commit(&mut self, draft: K::Draft) -> Result<EntityId> {
        match K::draft_id(&draft) {
            Some(id) => self.update(id, draft).map(|()| id),
            None => Ok(self.create(draft)),
        }
    }

    /// Remove and return the entity with `id`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if no entity has this id.
    pub fn remove(&mut self, id: EntityId) -> Result<K::Draft> {
        let index = self
            .position(id)
            .ok_or(EditorError::NotFound { kind: K::NAME, id })?;
        tracing::info!(kind = K::NAME, %id, "Entity removed");
        Ok(self.entries.remove(index))
    }

    /// The entity with `id`
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&K::Draft> {
        self.position(id).map(|index| &self.entries[index])
    }

    /// A source to open the editor on the entity with `id`
    #[must_use]
    pub fn source_for(&self, id: EntityId) -> Option<K::Source> {
        self.get(id).cloned().map(Into::into)
    }

    /// Entities in display order
    pub fn iter(&self) -> impl Iterator<Item = &K::Draft> {
        self.entries.iter()
    }

    /// Ids in display order
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.entries.iter().filter_map(K::draft_id).collect()
    }

    /// Number of entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| K::draft_id(entry) == Some(id))
    }
}

/// Cloneable handle to an [`EntityList`], usable as a modal's save handler
pub struct SharedEntityList<K: EntityKind> {
    inner: Arc<Mutex<EntityList<K>>>,
}

impl<K: EntityKind> SharedEntityList<K> {
    /// Share `list`
    #[must_use]
    pub fn new(list: EntityList<K>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(list)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EntityList<K>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the list
    pub fn with<T>(&self, f: impl FnOnce(&EntityList<K>) -> T) -> T {
        f(&self.lock())
    }

    /// Mutate the list
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut EntityList<K>) -> T) -> T {
        f(&mut self.lock())
    }

    /// Snapshot of the entities in display order
    #[must_use]
    pub fn snapshot(&self) -> Vec<K::Draft> {
        self.with(|list| list.iter().cloned().collect())
    }
}

impl<K: EntityKind> Clone for SharedEntityList<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: EntityKind> SaveHandler<K::Draft> for SharedEntityList<K> {
    fn save(&self, draft: K::Draft) {
        if let Err(error) = self.with_mut(|list| list.commit(draft)) {
            tracing::warn!(kind = K::NAME, %error, "Dropped committed draft");
        }
    }
}
