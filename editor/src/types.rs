//! Domain types for event sub-entity editors.
//!
//! Two entity kinds are edited through the overlay editor: tickets and
//! discount codes. Each has a *draft* (every field present, the shape the
//! editor works on) and a *source* (every field optional, the possibly
//! partial entity the editor is opened with).
//!
//! Field values are kept as the raw text the user typed. Numbers are only
//! parsed at validation time.

use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of an entity within its list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Creates an `EntityId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a field holds text or a checked-state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Raw text, stored unconverted
    Text,
    /// Boolean checked-state of a checkbox-like control
    Flag,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Flag => f.write_str("flag"),
        }
    }
}

// ========== Tickets ==========

/// Fully populated working copy of a ticket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    /// Present once the ticket has been added to a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Display name
    pub name: String,
    /// Decimal as text
    pub price: String,
    /// Decimal as text, or the `"No Limit"` sentinel
    pub quantity: String,
    /// Whether a per-order purchase limit applies
    pub enable_max_purchase: bool,
    /// Per-order purchase limit
    pub purchase_limit: String,
    /// Custom sale window start date (unvalidated)
    pub sales_start_date: String,
    /// Custom sale window start time (unvalidated)
    pub sales_start_time: String,
    /// Custom sale window end date (unvalidated)
    pub sales_end_date: String,
    /// Custom sale window end time (unvalidated)
    pub sales_end_time: String,
    /// Whether only an advance is charged up front
    pub is_advance: bool,
    /// Advance amount
    pub advance_amount: String,
    /// Free-form description
    pub description: String,
    /// Reference to the ticket whose sell-out opens this one's sale
    pub sale_after_ticket: String,
}

impl TicketDraft {
    /// Text value of `field`, or `None` for flag fields
    #[must_use]
    pub fn text(&self, field: TicketField) -> Option<&str> {
        Some(match field {
            TicketField::Name => &self.name,
            TicketField::Price => &self.price,
            TicketField::Quantity => &self.quantity,
            TicketField::PurchaseLimit => &self.purchase_limit,
            TicketField::SalesStartDate => &self.sales_start_date,
            TicketField::SalesStartTime => &self.sales_start_time,
            TicketField::SalesEndDate => &self.sales_end_date,
            TicketField::SalesEndTime => &self.sales_end_time,
            TicketField::AdvanceAmount => &self.advance_amount,
            TicketField::Description => &self.description,
            TicketField::SaleAfterTicket => &self.sale_after_ticket,
            TicketField::EnableMaxPurchase | TicketField::IsAdvance => return None,
        })
    }

    pub(crate) fn text_mut(&mut self, field: TicketField) -> Option<&mut String> {
        match field {
            TicketField::Name => Some(&mut self.name),
            TicketField::Price => Some(&mut self.price),
            TicketField::Quantity => Some(&mut self.quantity),
            TicketField::PurchaseLimit => Some(&mut self.purchase_limit),
            TicketField::SalesStartDate => Some(&mut self.sales_start_date),
            TicketField::SalesStartTime => Some(&mut self.sales_start_time),
            TicketField::SalesEndDate => Some(&mut self.sales_end_date),
            TicketField::SalesEndTime => Some(&mut self.sales_end_time),
            TicketField::AdvanceAmount => Some(&mut self.advance_amount),
            TicketField::Description => Some(&mut self.description),
            TicketField::SaleAfterTicket => Some(&mut self.sale_after_ticket),
            TicketField::EnableMaxPurchase | TicketField::IsAdvance => None,
        }
    }

    pub(crate) fn flag_mut(&mut self, field: TicketField) -> Option<&mut bool> {
        match field {
            TicketField::EnableMaxPurchase => Some(&mut self.enable_max_purchase),
            TicketField::IsAdvance => Some(&mut self.is_advance),
            _ => None,
        }
    }
}

/// Possibly partial ticket, as handed to the editor by its parent list
///
/// Deserializes from any subset of the camelCase draft keys; `{}` is a
/// valid (create-mode) source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)] // Mirrors `TicketDraft` field for field
pub struct TicketSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_max_purchase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_advance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_after_ticket: Option<String>,
}

impl From<TicketDraft> for TicketSource {
    fn from(draft: TicketDraft) -> Self {
        Self {
            id: draft.id,
            name: Some(draft.name),
            price: Some(draft.price),
            quantity: Some(draft.quantity),
            enable_max_purchase: Some(draft.enable_max_purchase),
            purchase_limit: Some(draft.purchase_limit),
            sales_start_date: Some(draft.sales_start_date),
            sales_start_time: Some(draft.sales_start_time),
            sales_end_date: Some(draft.sales_end_date),
            sales_end_time: Some(draft.sales_end_time),
            is_advance: Some(draft.is_advance),
            advance_amount: Some(draft.advance_amount),
            description: Some(draft.description),
            sale_after_ticket: Some(draft.sale_after_ticket),
        }
    }
}

/// The fixed key set of a ticket draft
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum TicketField {
    Name,
    Price,
    Quantity,
    EnableMaxPurchase,
    PurchaseLimit,
    SalesStartDate,
    SalesStartTime,
    SalesEndDate,
    SalesEndTime,
    IsAdvance,
    AdvanceAmount,
    Description,
    SaleAfterTicket,
}

impl TicketField {
    /// Every ticket field, in form order
    pub const ALL: [Self; 13] = [
        Self::Name,
        Self::Price,
        Self::Quantity,
        Self::EnableMaxPurchase,
        Self::PurchaseLimit,
        Self::SalesStartDate,
        Self::SalesStartTime,
        Self::SalesEndDate,
        Self::SalesEndTime,
        Self::IsAdvance,
        Self::AdvanceAmount,
        Self::Description,
        Self::SaleAfterTicket,
    ];

    /// Wire name, as used by input controls
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::EnableMaxPurchase => "enableMaxPurchase",
            Self::PurchaseLimit => "purchaseLimit",
            Self::SalesStartDate => "salesStartDate",
            Self::SalesStartTime => "salesStartTime",
            Self::SalesEndDate => "salesEndDate",
            Self::SalesEndTime => "salesEndTime",
            Self::IsAdvance => "isAdvance",
            Self::AdvanceAmount => "advanceAmount",
            Self::Description => "description",
            Self::SaleAfterTicket => "saleAfterTicket",
        }
    }

    /// Whether the field stores text or a checked-state
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::EnableMaxPurchase | Self::IsAdvance => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketField {
    type Err = EditorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| EditorError::UnknownField {
                kind: "ticket",
                name: name.to_string(),
            })
    }
}

// ========== Discount codes ==========

/// Fully populated working copy of a discount code
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCodeDraft {
    /// Absent for codes not yet added to a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// The code customers type at checkout
    pub code: String,
    /// Numeric text, 0 to 100
    pub discount_percentage: String,
    /// Numeric text, 0 or greater
    pub max_discount_amount: String,
    /// Numeric text, 0 or greater
    pub min_discount_amount: String,
    /// Positive integer text
    pub quantity: String,
    /// Display only; carried through the editor untouched
    pub status: String,
}

impl DiscountCodeDraft {
    /// Text value of `field`
    #[must_use]
    pub fn text(&self, field: DiscountCodeField) -> &str {
        match field {
            DiscountCodeField::Code => &self.code,
            DiscountCodeField::DiscountPercentage => &self.discount_percentage,
            DiscountCodeField::MaxDiscountAmount => &self.max_discount_amount,
            DiscountCodeField::MinDiscountAmount => &self.min_discount_amount,
            DiscountCodeField::Quantity => &self.quantity,
        }
    }

    pub(crate) fn text_mut(&mut self, field: DiscountCodeField) -> &mut String {
        match field {
            DiscountCodeField::Code => &mut self.code,
            DiscountCodeField::DiscountPercentage => &mut self.discount_percentage,
            DiscountCodeField::MaxDiscountAmount => &mut self.max_discount_amount,
            DiscountCodeField::MinDiscountAmount => &mut self.min_discount_amount,
            DiscountCodeField::Quantity => &mut self.quantity,
        }
    }
}

/// Possibly partial discount code, as handed to the editor by its parent list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)] // Mirrors `DiscountCodeDraft` field for field
pub struct DiscountCodeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_discount_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<DiscountCodeDraft> for DiscountCodeSource {
    fn from(draft: DiscountCodeDraft) -> Self {
        Self {
            id: draft.id,
            code: Some(draft.code),
            discount_percentage: Some(draft.discount_percentage),
            max_discount_amount: Some(draft.max_discount_amount),
            min_discount_amount: Some(draft.min_discount_amount),
            quantity: Some(draft.quantity),
            status: Some(draft.status),
        }
    }
}

/// The editable key set of a discount code draft
///
/// `status` is display-only and not part of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum DiscountCodeField {
    Code,
    DiscountPercentage,
    MaxDiscountAmount,
    MinDiscountAmount,
    Quantity,
}

impl DiscountCodeField {
    /// Every editable discount code field, in form order
    pub const ALL: [Self; 5] = [
        Self::Code,
        Self::DiscountPercentage,
        Self::MaxDiscountAmount,
        Self::MinDiscountAmount,
        Self::Quantity,
    ];

    /// Wire name, as used by input controls
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::DiscountPercentage => "discountPercentage",
            Self::MaxDiscountAmount => "maxDiscountAmount",
            Self::MinDiscountAmount => "minDiscountAmount",
            Self::Quantity => "quantity",
        }
    }

    /// Human-readable label used in validation messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::DiscountPercentage => "Discount percentage",
            Self::MaxDiscountAmount => "Max discount amount",
            Self::MinDiscountAmount => "Min discount amount",
            Self::Quantity => "Quantity",
        }
    }
}

impl fmt::Display for DiscountCodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountCodeField {
    type Err = EditorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| EditorError::UnknownField {
                kind: "discount code",
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn ticket_field_names_round_trip() {
        for field in TicketField::ALL {
            assert_eq!(field.as_str().parse::<TicketField>().unwrap(), field);
        }
    }

    #[test]
    fn ticket_field_serde_name_matches_wire_name() {
        let json = serde_json::to_string(&TicketField::EnableMaxPurchase).unwrap();
        assert_eq!(json, "\"enableMaxPurchase\"");
    }

    #[test]
    fn unknown_discount_field_is_rejected() {
        let err = "status".parse::<DiscountCodeField>().unwrap_err();
        assert!(matches!(err, EditorError::UnknownField { name, .. } if name == "status"));
    }

    #[test]
    fn partial_ticket_source_deserializes() {
        let source: TicketSource =
            serde_json::from_str(r#"{"name":"VIP","enableMaxPurchase":true}"#).unwrap();
        assert_eq!(source.name.as_deref(), Some("VIP"));
        assert_eq!(source.enable_max_purchase, Some(true));
        assert_eq!(source.price, None);
    }

    #[test]
    fn empty_object_is_default_source() {
        let source: DiscountCodeSource = serde_json::from_str("{}").unwrap();
        assert_eq!(source, DiscountCodeSource::default());
    }

    #[test]
    fn flag_fields_have_no_text() {
        let draft = crate::seed::ticket_template();
        assert_eq!(draft.text(TicketField::IsAdvance), None);
        assert_eq!(draft.text(TicketField::Name), Some(""));
    }
}
