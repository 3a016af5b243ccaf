//! Field updates driven by input-control change events.
//!
//! A change event names a field, carries the control's raw text and checked
//! state, and says what kind of control fired it. Checkbox-like controls
//! store their checked state; every other control stores the raw text as
//! typed. Nothing is parsed here.

use crate::error::Result;
use crate::kind::EntityKind;
use crate::types::FieldKind;
use serde::{Deserialize, Serialize};

/// Kind of control that produced an [`InputEvent`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Date,
    Time,
    Select,
    TextArea,
    Checkbox,
}

impl InputKind {
    /// Whether the control's meaningful value is its checked state
    #[must_use]
    pub const fn is_boolean_bearing(self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

/// A control's change event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Wire name of the field the control is bound to
    pub name: String,
    /// Raw text value of the control
    pub value: String,
    /// Checked state (only meaningful for checkbox-like controls)
    pub checked: bool,
    /// What fired the event
    pub kind: InputKind,
}

impl InputEvent {
    /// Event from a control of the given kind
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            checked: false,
            kind,
        }
    }

    /// Event from a plain text input
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, InputKind::Text)
    }

    /// Event from a checkbox
    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            value: if checked { "on" } else { "" }.to_string(),
            checked,
            kind: InputKind::Checkbox,
        }
    }

    /// The value this event stores
    #[must_use]
    pub fn stored_value(&self) -> FieldValue {
        if self.kind.is_boolean_bearing() {
            FieldValue::Flag(self.checked)
        } else {
            FieldValue::Text(self.value.clone())
        }
    }
}

/// A value about to be written into a draft field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Raw text, unconverted
    Text(String),
    /// Checked state
    Flag(bool),
}

impl FieldValue {
    /// Kind of field this value fits
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Flag(_) => FieldKind::Flag,
        }
    }
}

/// Resolve the field an event targets
///
/// # Errors
///
/// Returns [`crate::EditorError::UnknownField`] if the kind has no such field.
pub fn target_field<K: EntityKind>(event: &InputEvent) -> Result<K::Field> {
    event.name.parse()
}

/// Apply the event to `draft` in place, returning the field it targeted
///
/// # Errors
///
/// Same as [`update_field`]. On error `draft` is untouched.
pub fn apply_event<K: EntityKind>(draft: &mut K::Draft, event: &InputEvent) -> Result<K::Field> {
    let field = target_field::<K>(event)?;
    K::set_field(draft, field, event.stored_value())?;
    Ok(field)
}

/// Return a copy of `draft` with the event's field replaced
///
/// # Errors
///
/// Returns [`crate::EditorError::UnknownField`] for a name the kind doesn't
/// have and [`crate::EditorError::FieldKindMismatch`] when the control kind
/// doesn't fit the field (a checkbox on a text field, say).
pub fn update_field<K: EntityKind>(draft: &K::Draft, event: &InputEvent) -> Result<K::Draft> {
    let mut next = draft.clone();
    apply_event::<K>(&mut next, event)?;
    Ok(next)
}
