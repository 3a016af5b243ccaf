//! Toggle state machines for the ticket editor's conditional field groups.
//!
//! Both machines are pure: a transition takes the current state and draft
//! and returns the next state and draft. Neither knows anything about how
//! the groups are displayed.

use crate::types::TicketDraft;
use serde::{Deserialize, Serialize};

/// Quantity value meaning "unlimited"
pub const NO_LIMIT: &str = "No Limit";

/// Whether a ticket has a finite quantity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuantityMode {
    /// Quantity is a number the user types
    #[default]
    Limited,
    /// Quantity holds the [`NO_LIMIT`] sentinel
    Unlimited,
}

impl QuantityMode {
    /// Mode implied by a freshly seeded draft
    #[must_use]
    pub fn from_draft(draft: &TicketDraft) -> Self {
        if draft.quantity == NO_LIMIT {
            Self::Unlimited
        } else {
            Self::Limited
        }
    }

    /// Move to `target`, rewriting the quantity field as needed
    ///
    /// Entering `Unlimited` writes the sentinel. Returning to `Limited`
    /// blanks the field only if it still holds the sentinel, so a typed
    /// value is never thrown away.
    #[must_use]
    pub fn transition(self, target: Self, mut draft: TicketDraft) -> (Self, TicketDraft) {
        match (self, target) {
            (Self::Limited, Self::Unlimited) => {
                draft.quantity = NO_LIMIT.to_string();
            },
            (Self::Unlimited, Self::Limited) => {
                if draft.quantity == NO_LIMIT {
                    draft.quantity.clear();
                }
            },
            (Self::Limited, Self::Limited) | (Self::Unlimited, Self::Unlimited) => {},
        }
        (target, draft)
    }
}

/// How a ticket's sale window is expressed
///
/// A display selector only: switching never clears the inactive group's
/// fields, so toggling back restores what was there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaleWindowMode {
    /// Explicit start/end date and time
    #[default]
    Custom,
    /// Sale opens when another ticket sells out
    BeforeAfter,
}

impl SaleWindowMode {
    /// Mode implied by a freshly seeded draft
    #[must_use]
    pub fn from_draft(draft: &TicketDraft) -> Self {
        if draft.sale_after_ticket.trim().is_empty() {
            Self::Custom
        } else {
            Self::BeforeAfter
        }
    }

    /// Move to `target`; the draft passes through unchanged
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn transition(self, target: Self, draft: TicketDraft) -> (Self, TicketDraft) {
        (target, draft)
    }
}

/// Both ticket toggle machines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketModes {
    /// Limited / unlimited quantity
    pub quantity: QuantityMode,
    /// Custom / before-after sale window
    pub sale_window: SaleWindowMode,
}

impl TicketModes {
    /// Modes implied by a freshly seeded draft
    #[must_use]
    pub fn from_draft(draft: &TicketDraft) -> Self {
        Self {
            quantity: QuantityMode::from_draft(draft),
            sale_window: SaleWindowMode::from_draft(draft),
        }
    }

    /// Apply one toggle
    #[must_use]
    pub fn apply(self, toggle: TicketToggle, draft: TicketDraft) -> (Self, TicketDraft) {
        match toggle {
            TicketToggle::Quantity(target) => {
                let (quantity, draft) = self.quantity.transition(target, draft);
                (Self { quantity, ..self }, draft)
            },
            TicketToggle::SaleWindow(target) => {
                let (sale_window, draft) = self.sale_window.transition(target, draft);
                (
                    Self {
                        sale_window,
                        ..self
                    },
                    draft,
                )
            },
        }
    }
}

/// A user switching one of the ticket mode selectors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TicketToggle {
    /// Select a quantity mode
    Quantity(QuantityMode),
    /// Select a sale-window mode
    SaleWindow(SaleWindowMode),
}
