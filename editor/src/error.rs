//! Error types for the editor.
//!
//! Validation failures are not errors: they are data (`FieldErrors`) kept on
//! the open modal. `EditorError` covers inputs the editor cannot apply at all.

use crate::types::{EntityId, FieldKind};
use draft_editor_runtime::StoreError;
use thiserror::Error;

/// Errors raised by the editor and its entity lists
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// An input event named a field the entity kind doesn't have
    #[error("{kind} has no field named `{name}`")]
    UnknownField {
        /// Entity kind being edited
        kind: &'static str,
        /// The offending field name
        name: String,
    },

    /// A checkbox event targeted a text field, or vice versa
    #[error("field `{field}` holds {expected} values, got {got}")]
    FieldKindMismatch {
        /// Wire name of the field
        field: &'static str,
        /// What the field stores
        expected: FieldKind,
        /// What the input event carried
        got: FieldKind,
    },

    /// No entity with this id in the list
    #[error("no {kind} with id {id}")]
    NotFound {
        /// Entity kind of the list
        kind: &'static str,
        /// The id that was looked up
        id: EntityId,
    },

    /// The modal store refused to finish processing an action
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
