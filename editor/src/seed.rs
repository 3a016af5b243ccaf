//! Draft templates and the draft seeder.
//!
//! A draft is seeded by laying a source entity over its kind's template:
//! every key the source carries wins, every key it omits keeps the template
//! default. The merge is spelled out key by key so a draft can never be
//! missing a field.

use crate::types::{DiscountCodeDraft, DiscountCodeSource, TicketDraft, TicketSource};

/// Default field values of a new ticket
#[must_use]
pub fn ticket_template() -> TicketDraft {
    TicketDraft {
        id: None,
        name: String::new(),
        price: String::new(),
        quantity: String::new(),
        enable_max_purchase: false,
        purchase_limit: String::new(),
        sales_start_date: String::new(),
        sales_start_time: String::new(),
        sales_end_date: String::new(),
        sales_end_time: String::new(),
        is_advance: false,
        advance_amount: String::new(),
        description: String::new(),
        sale_after_ticket: String::new(),
    }
}

/// Default field values of a new discount code
#[must_use]
pub fn discount_code_template() -> DiscountCodeDraft {
    DiscountCodeDraft {
        id: None,
        code: String::new(),
        discount_percentage: String::new(),
        max_discount_amount: String::new(),
        min_discount_amount: String::new(),
        quantity: String::new(),
        status: String::new(),
    }
}

fn pick<T: Clone>(source: Option<&T>, default: &T) -> T {
    source.unwrap_or(default).clone()
}

/// Merge a (possibly partial) ticket over `template`
#[must_use]
pub fn seed_ticket(template: &TicketDraft, source: &TicketSource) -> TicketDraft {
    TicketDraft {
        id: source.id.or(template.id),
        name: pick(source.name.as_ref(), &template.name),
        price: pick(source.price.as_ref(), &template.price),
        quantity: pick(source.quantity.as_ref(), &template.quantity),
        enable_max_purchase: source
            .enable_max_purchase
            .unwrap_or(template.enable_max_purchase),
        purchase_limit: pick(source.purchase_limit.as_ref(), &template.purchase_limit),
        sales_start_date: pick(source.sales_start_date.as_ref(), &template.sales_start_date),
        sales_start_time: pick(source.sales_start_time.as_ref(), &template.sales_start_time),
        sales_end_date: pick(source.sales_end_date.as_ref(), &template.sales_end_date),
        sales_end_time: pick(source.sales_end_time.as_ref(), &template.sales_end_time),
        is_advance: source.is_advance.unwrap_or(template.is_advance),
        advance_amount: pick(source.advance_amount.as_ref(), &template.advance_amount),
        description: pick(source.description.as_ref(), &template.description),
        sale_after_ticket: pick(source.sale_after_ticket.as_ref(), &template.sale_after_ticket),
    }
}

/// Merge a (possibly partial) discount code over `template`
#[must_use]
pub fn seed_discount_code(
    template: &DiscountCodeDraft,
    source: &DiscountCodeSource,
) -> DiscountCodeDraft {
    DiscountCodeDraft {
        id: source.id.or(template.id),
        code: pick(source.code.as_ref(), &template.code),
        discount_percentage: pick(
            source.discount_percentage.as_ref(),
            &template.discount_percentage,
        ),
        max_discount_amount: pick(
            source.max_discount_amount.as_ref(),
            &template.max_discount_amount,
        ),
        min_discount_amount: pick(
            source.min_discount_amount.as_ref(),
            &template.min_discount_amount,
        ),
        quantity: pick(source.quantity.as_ref(), &template.quantity),
        status: pick(source.status.as_ref(), &template.status),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::types::EntityId;
    use proptest::prelude::*;
    use uuid::Uuid;

    #[test]
    fn empty_source_yields_template() {
        let template = ticket_template();
        assert_eq!(seed_ticket(&template, &TicketSource::default()), template);

        let template = discount_code_template();
        assert_eq!(
            seed_discount_code(&template, &DiscountCodeSource::default()),
            template
        );
    }

    #[test]
    fn present_keys_override_template() {
        let source: TicketSource =
            serde_json::from_str(r#"{"name":"Early bird","quantity":"No Limit","isAdvance":true}"#)
                .unwrap();

        let draft = seed_ticket(&ticket_template(), &source);

        assert_eq!(draft.name, "Early bird");
        assert_eq!(draft.quantity, "No Limit");
        assert!(draft.is_advance);
        assert_eq!(draft.price, "");
        assert!(!draft.enable_max_purchase);
    }

    #[test]
    fn explicit_empty_value_still_overrides() {
        let mut template = discount_code_template();
        template.status = "Active".to_string();
        let source = DiscountCodeSource {
            status: Some(String::new()),
            ..DiscountCodeSource::default()
        };

        assert_eq!(seed_discount_code(&template, &source).status, "");
    }

    #[test]
    fn source_id_is_carried() {
        let id = EntityId::from_uuid(Uuid::from_u128(7));
        let source = DiscountCodeSource {
            id: Some(id),
            code: Some("X10".to_string()),
            ..DiscountCodeSource::default()
        };

        let draft = seed_discount_code(&discount_code_template(), &source);

        assert_eq!(draft.id, Some(id));
        assert_eq!(draft.code, "X10");
    }

    fn text() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-zA-Z0-9 .:-]{0,12}")
    }

    fn flag() -> impl Strategy<Value = Option<bool>> {
        proptest::option::of(any::<bool>())
    }

    fn id() -> impl Strategy<Value = Option<EntityId>> {
        proptest::option::of(any::<u128>().prop_map(|n| EntityId::from_uuid(Uuid::from_u128(n))))
    }

    prop_compose! {
        fn ticket_basics()(
            id in id(),
            name in text(),
            price in text(),
            quantity in text(),
            enable_max_purchase in flag(),
            purchase_limit in text(),
            description in text(),
        ) -> TicketSource {
            TicketSource {
                id,
                name,
                price,
                quantity,
                enable_max_purchase,
                purchase_limit,
                description,
                ..TicketSource::default()
            }
        }
    }

    prop_compose! {
        fn ticket_source()(
            basics in ticket_basics(),
            sales_start_date in text(),
            sales_start_time in text(),
            sales_end_date in text(),
            sales_end_time in text(),
            is_advance in flag(),
            advance_amount in text(),
            sale_after_ticket in text(),
        ) -> TicketSource {
            TicketSource {
                sales_start_date,
                sales_start_time,
                sales_end_date,
                sales_end_time,
                is_advance,
                advance_amount,
                sale_after_ticket,
                ..basics
            }
        }
    }

    proptest! {
        #[test]
        fn seed_agrees_with_source_and_template(source in ticket_source()) {
            let mut template = ticket_template();
            template.id = Some(EntityId::from_uuid(Uuid::from_u128(u128::MAX)));
            template.name = "template name".to_string();
            template.sales_end_date = "2026-12-31".to_string();
            template.advance_amount = "10".to_string();
            template.is_advance = true;

            let draft = seed_ticket(&template, &source);

            prop_assert_eq!(draft.id, source.id.or(template.id));
            prop_assert_eq!(&draft.name, source.name.as_ref().unwrap_or(&template.name));
            prop_assert_eq!(&draft.price, source.price.as_ref().unwrap_or(&template.price));
            prop_assert_eq!(&draft.quantity, source.quantity.as_ref().unwrap_or(&template.quantity));
            prop_assert_eq!(
                draft.enable_max_purchase,
                source.enable_max_purchase.unwrap_or(template.enable_max_purchase)
            );
            prop_assert_eq!(
                &draft.purchase_limit,
                source.purchase_limit.as_ref().unwrap_or(&template.purchase_limit)
            );
            prop_assert_eq!(
                &draft.sales_start_date,
                source.sales_start_date.as_ref().unwrap_or(&template.sales_start_date)
            );
            prop_assert_eq!(
                &draft.sales_start_time,
                source.sales_start_time.as_ref().unwrap_or(&template.sales_start_time)
            );
            prop_assert_eq!(
                &draft.sales_end_date,
                source.sales_end_date.as_ref().unwrap_or(&template.sales_end_date)
            );
            prop_assert_eq!(
                &draft.sales_end_time,
                source.sales_end_time.as_ref().unwrap_or(&template.sales_end_time)
            );
            prop_assert_eq!(draft.is_advance, source.is_advance.unwrap_or(template.is_advance));
            prop_assert_eq!(
                &draft.advance_amount,
                source.advance_amount.as_ref().unwrap_or(&template.advance_amount)
            );
            prop_assert_eq!(
                &draft.description,
                source.description.as_ref().unwrap_or(&template.description)
            );
            prop_assert_eq!(
                &draft.sale_after_ticket,
                source.sale_after_ticket.as_ref().unwrap_or(&template.sale_after_ticket)
            );
        }

        #[test]
        fn reseeding_from_a_full_draft_is_identity(source in ticket_source()) {
            let draft = seed_ticket(&ticket_template(), &source);
            let again = seed_ticket(&ticket_template(), &TicketSource::from(draft.clone()));
            prop_assert_eq!(again, draft);
        }
    }
}
