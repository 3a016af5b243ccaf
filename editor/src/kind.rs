//! Entity kinds the overlay editor can work on.
//!
//! [`EntityKind`] ties together everything kind-specific: the draft and
//! source shapes, the field key set, the template, toggle machines, and the
//! (optional) validation engine. The modal reducer and the entity list are
//! generic over it.

use crate::error::{EditorError, Result};
use crate::field::FieldValue;
use crate::seed;
use crate::toggle::{TicketModes, TicketToggle};
use crate::types::{
    DiscountCodeDraft, DiscountCodeField, DiscountCodeSource, EntityId, FieldKind, TicketDraft,
    TicketField, TicketSource,
};
use crate::validation::{FieldErrors, validate_discount_code};
use std::convert::Infallible;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Kind-specific behavior of an editable entity
pub trait EntityKind: Copy + Debug + Default + 'static {
    /// Kind name used in logs and errors
    const NAME: &'static str;

    /// Fully populated working copy
    type Draft: Clone + Debug + PartialEq + Send + 'static;

    /// Possibly partial entity the editor is opened with
    type Source: Clone + Debug + PartialEq + Default + From<Self::Draft>;

    /// The fixed key set of the draft
    type Field: Copy + Debug + Display + Ord + FromStr<Err = EditorError>;

    /// State of the kind's toggle machines
    type Modes: Copy + Debug + PartialEq + Default;

    /// A user switching one of the toggle machines
    type Toggle: Clone + Debug;

    /// Default value of every field
    fn template() -> Self::Draft;

    /// Lay `source` over the template
    fn seed(source: &Self::Source) -> Self::Draft;

    /// Identifier carried by the draft; `None` means "create"
    fn draft_id(draft: &Self::Draft) -> Option<EntityId>;

    /// Stamp `id` onto the draft
    fn assign_id(draft: &mut Self::Draft, id: EntityId);

    /// Replace one field's value
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::FieldKindMismatch`] when `value` doesn't fit
    /// the field; the draft is left untouched.
    fn set_field(draft: &mut Self::Draft, field: Self::Field, value: FieldValue) -> Result<()>;

    /// Toggle-machine state implied by a freshly seeded draft
    fn modes_for(draft: &Self::Draft) -> Self::Modes;

    /// Run one toggle transition
    fn apply_toggle(
        modes: Self::Modes,
        draft: Self::Draft,
        toggle: Self::Toggle,
    ) -> (Self::Modes, Self::Draft);

    /// Run the kind's validation engine
    ///
    /// `None` means the kind has no validation step on submit.
    fn validate(_draft: &Self::Draft) -> Option<FieldErrors<Self::Field>> {
        None
    }
}

fn mismatch(field: &'static str, expected: FieldKind, value: &FieldValue) -> EditorError {
    EditorError::FieldKindMismatch {
        field,
        expected,
        got: value.kind(),
    }
}

/// Event tickets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ticket;

impl EntityKind for Ticket {
    const NAME: &'static str = "ticket";

    type Draft = TicketDraft;
    type Source = TicketSource;
    type Field = TicketField;
    type Modes = TicketModes;
    type Toggle = TicketToggle;

    fn template() -> TicketDraft {
        seed::ticket_template()
    }

    fn seed(source: &TicketSource) -> TicketDraft {
        seed::seed_ticket(&Self::template(), source)
    }

    fn draft_id(draft: &TicketDraft) -> Option<EntityId> {
        draft.id
    }

    fn assign_id(draft: &mut TicketDraft, id: EntityId) {
        draft.id = Some(id);
    }

    fn set_field(draft: &mut TicketDraft, field: TicketField, value: FieldValue) -> Result<()> {
        match value {
            FieldValue::Text(text) => match draft.text_mut(field) {
                Some(slot) => *slot = text,
                None => {
                    return Err(mismatch(field.as_str(), field.kind(), &FieldValue::Text(text)));
                },
            },
            FieldValue::Flag(flag) => match draft.flag_mut(field) {
                Some(slot) => *slot = flag,
                None => {
                    return Err(mismatch(field.as_str(), field.kind(), &FieldValue::Flag(flag)));
                },
            },
        }
        Ok(())
    }

    fn modes_for(draft: &TicketDraft) -> TicketModes {
        TicketModes::from_draft(draft)
    }

    fn apply_toggle(
        modes: TicketModes,
        draft: TicketDraft,
        toggle: TicketToggle,
    ) -> (TicketModes, TicketDraft) {
        modes.apply(toggle, draft)
    }
}

/// Event discount codes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiscountCode;

impl EntityKind for DiscountCode {
    const NAME: &'static str = "discount code";

    type Draft = DiscountCodeDraft;
    type Source = DiscountCodeSource;
    type Field = DiscountCodeField;
    type Modes = ();
    type Toggle = Infallible;

    fn template() -> DiscountCodeDraft {
        seed::discount_code_template()
    }

    fn seed(source: &DiscountCodeSource) -> DiscountCodeDraft {
        seed::seed_discount_code(&Self::template(), source)
    }

    fn draft_id(draft: &DiscountCodeDraft) -> Option<EntityId> {
        draft.id
    }

    fn assign_id(draft: &mut DiscountCodeDraft, id: EntityId) {
        draft.id = Some(id);
    }

    fn set_field(
        draft: &mut DiscountCodeDraft,
        field: DiscountCodeField,
        value: FieldValue,
    ) -> Result<()> {
        match value {
            FieldValue::Text(text) => {
                *draft.text_mut(field) = text;
                Ok(())
            },
            flag @ FieldValue::Flag(_) => Err(mismatch(field.as_str(), FieldKind::Text, &flag)),
        }
    }

    fn modes_for(_draft: &DiscountCodeDraft) {}

    fn apply_toggle(
        _modes: (),
        _draft: DiscountCodeDraft,
        toggle: Infallible,
    ) -> ((), DiscountCodeDraft) {
        match toggle {}
    }

    fn validate(draft: &DiscountCodeDraft) -> Option<FieldErrors<DiscountCodeField>> {
        Some(validate_discount_code(draft))
    }
}
