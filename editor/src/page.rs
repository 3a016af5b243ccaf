//! A list of entities with its editing modal.
//!
//! [`ListEditor`] is what a page embeds per entity kind: the canonical list,
//! and a modal store whose save handler commits into that list.

use crate::error::{EditorError, Result};
use crate::kind::EntityKind;
use crate::list::{EntityList, SharedEntityList};
use crate::modal::{ModalAction, ModalEnvironment, ModalReducer, ModalState};
use crate::types::EntityId;
use draft_editor_core::environment::IdGenerator;
use draft_editor_runtime::{Store, StoreConfig};
use std::sync::Arc;

/// Store running one modal
pub type ModalStore<K> = Store<ModalState<K>, ModalAction<K>, ModalEnvironment<K>, ModalReducer<K>>;

/// Entity list plus the modal that edits it
pub struct ListEditor<K: EntityKind> {
    list: SharedEntityList<K>,
    modal: ModalStore<K>,
}

impl<K: EntityKind> ListEditor<K> {
    /// An empty list drawing ids from `ids`, with a closed modal
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_config(ids, StoreConfig::default())
    }

    /// Like [`ListEditor::new`] with a custom store configuration
    #[must_use]
    pub fn with_config(ids: Arc<dyn IdGenerator>, config: StoreConfig) -> Self {
        let list = SharedEntityList::new(EntityList::new(ids));
        let env = ModalEnvironment::new(Arc::new(list.clone()));
        Self {
            list,
            modal: Store::with_config(ModalState::new(), ModalReducer::new(), env, config),
        }
    }

    /// Open the modal on a blank draft
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the store gives up.
    pub fn open_create(&mut self) -> Result<usize> {
        self.dispatch(ModalAction::Open {
            source: K::Source::default(),
        })
    }

    /// Open the modal on the entity with `id`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the list has no such entity.
    pub fn open_edit(&mut self, id: EntityId) -> Result<usize> {
        let source = self
            .list
            .with(|list| list.source_for(id))
            .ok_or(EditorError::NotFound { kind: K::NAME, id })?;
        self.dispatch(ModalAction::Open { source })
    }

    /// Send an action to the modal
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the store gives up.
    pub fn dispatch(&mut self, action: ModalAction<K>) -> Result<usize> {
        Ok(self.modal.send(action)?)
    }

    /// Read the modal state
    pub fn modal<T>(&self, f: impl FnOnce(&ModalState<K>) -> T) -> T {
        self.modal.state(f)
    }

    /// The canonical list
    #[must_use]
    pub const fn list(&self) -> &SharedEntityList<K> {
        &self.list
    }

    /// Entities in display order
    #[must_use]
    pub fn entries(&self) -> Vec<K::Draft> {
        self.list.snapshot()
    }

    /// Delete the entity with `id`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NotFound`] if the list has no such entity.
    pub fn remove(&mut self, id: EntityId) -> Result<K::Draft> {
        self.list.with_mut(|list| list.remove(id))
    }
}
