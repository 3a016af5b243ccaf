//! # Event Editor
//!
//! Draft-edit-validate-commit overlay editors for event tickets and discount
//! codes.
//!
//! An editor is opened on a possibly partial source entity, seeds a fully
//! populated draft from the kind's template, applies raw input events to it,
//! and on submit either records per-field errors or hands the draft to the
//! list it edits. All of it is a [`draft_editor_core::reducer::Reducer`]
//! driven by a [`draft_editor_runtime::Store`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use draft_editor_core::environment::UuidV4Generator;
//! use event_editor::{DiscountCode, InputEvent, ListEditor, ModalAction};
//!
//! # fn main() -> Result<(), event_editor::EditorError> {
//! let mut page = ListEditor::<DiscountCode>::new(Arc::new(UuidV4Generator));
//!
//! page.open_create()?;
//! for (name, value) in [
//!     ("code", "SPRING10"),
//!     ("discountPercentage", "10"),
//!     ("maxDiscountAmount", "50"),
//!     ("minDiscountAmount", "0"),
//!     ("quantity", "100"),
//! ] {
//!     page.dispatch(ModalAction::UpdateField(InputEvent::text(name, value)))?;
//! }
//! page.dispatch(ModalAction::Submit)?;
//!
//! assert_eq!(page.entries().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod kind;
pub mod list;
pub mod modal;
pub mod page;
pub mod preview;
pub mod seed;
pub mod toggle;
pub mod types;
pub mod validation;

pub use error::{EditorError, Result};
pub use field::{FieldValue, InputEvent, InputKind, update_field};
pub use kind::{DiscountCode, EntityKind, Ticket};
pub use list::{EntityList, SharedEntityList};
pub use modal::{ModalAction, ModalEnvironment, ModalReducer, ModalState, Phase};
pub use page::{ListEditor, ModalStore};
pub use preview::{ObjectUrls, PreviewHandle, PreviewProvider, PreviewSlot};
pub use toggle::{NO_LIMIT, QuantityMode, SaleWindowMode, TicketModes, TicketToggle};
pub use types::{
    DiscountCodeDraft, DiscountCodeField, DiscountCodeSource, EntityId, FieldKind, TicketDraft,
    TicketField, TicketSource,
};
pub use validation::{FieldErrors, validate_discount_code};
