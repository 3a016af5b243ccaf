//! Field-scoped validation.
//!
//! Validation never fails the session: it produces a map from field to
//! message, and an empty map means the draft may be committed. Every field is
//! checked independently, so one bad field never hides another.

use crate::types::{DiscountCodeDraft, DiscountCodeField};
use serde::Serialize;
use std::collections::BTreeMap;

/// Messages keyed by the field they belong to, in form order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> FieldErrors<F> {
    /// An empty (valid) map
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record `message` for `field`, replacing any earlier one
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Message for `field`, if it failed
    #[must_use]
    pub fn get(&self, field: &F) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether `field` failed
    #[must_use]
    pub fn contains(&self, field: &F) -> bool {
        self.errors.contains_key(field)
    }

    /// Drop the message for `field`; returns whether there was one
    pub fn clear_field(&mut self, field: &F) -> bool {
        self.errors.remove(field).is_some()
    }

    /// `true` when nothing failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields and their messages, in form order
    pub fn iter(&self) -> impl Iterator<Item = (&F, &str)> {
        self.errors.iter().map(|(field, message)| (field, message.as_str()))
    }

    /// `Ok(())` when empty, otherwise the map itself
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn required(raw: &str, field: DiscountCodeField) -> Result<&str, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(format!("{} is required", field.label()))
    } else {
        Ok(trimmed)
    }
}

fn required_number(raw: &str, field: DiscountCodeField) -> Result<f64, String> {
    required(raw, field)?
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("{} must be a number", field.label()))
}

fn check_percentage(raw: &str) -> Result<(), String> {
    let field = DiscountCodeField::DiscountPercentage;
    let value = required_number(raw, field)?;
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{} must be between 0 and 100", field.label()))
    }
}

fn check_amount(raw: &str, field: DiscountCodeField) -> Result<(), String> {
    if required_number(raw, field)? >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be 0 or greater", field.label()))
    }
}

fn check_quantity(raw: &str) -> Result<(), String> {
    let field = DiscountCodeField::Quantity;
    let trimmed = required(raw, field)?;
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{} must be a whole number", field.label()));
    }
    // Arbitrarily long digit strings are still integers
    if negative || digits.bytes().all(|b| b == b'0') {
        Err(format!("{} must be greater than 0", field.label()))
    } else {
        Ok(())
    }
}

/// Check a discount code draft
///
/// There is intentionally no rule tying the min amount to the max amount.
#[must_use]
pub fn validate_discount_code(draft: &DiscountCodeDraft) -> FieldErrors<DiscountCodeField> {
    let checks = [
        (
            DiscountCodeField::Code,
            required(&draft.code, DiscountCodeField::Code).map(|_| ()),
        ),
        (
            DiscountCodeField::DiscountPercentage,
            check_percentage(&draft.discount_percentage),
        ),
        (
            DiscountCodeField::MaxDiscountAmount,
            check_amount(&draft.max_discount_amount, DiscountCodeField::MaxDiscountAmount),
        ),
        (
            DiscountCodeField::MinDiscountAmount,
            check_amount(&draft.min_discount_amount, DiscountCodeField::MinDiscountAmount),
        ),
        (DiscountCodeField::Quantity, check_quantity(&draft.quantity)),
    ];

    let mut errors = FieldErrors::new();
    for (field, outcome) in checks {
        if let Err(message) = outcome {
            errors.insert(field, message);
        }
    }
    errors
}
