//! Integration tests for list editors
//!
//! A `ListEditor` wires its modal's save handler to its own entity list, so
//! these tests check the list a page would render after each interaction.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use draft_editor_testing::SequentialIdGenerator;
use draft_editor_testing::helpers::init_tracing;
use event_editor::{
    DiscountCode, DiscountCodeSource, EditorError, EntityId, EntityKind, InputEvent, ListEditor,
    ModalAction, ModalState, SaleWindowMode, Ticket, TicketModes, TicketSource,
};
use std::sync::Arc;
use uuid::Uuid;

fn editor<K: EntityKind>() -> (ListEditor<K>, Arc<SequentialIdGenerator>) {
    init_tracing();
    let ids = Arc::new(SequentialIdGenerator::new());
    (ListEditor::new(ids.clone()), ids)
}

fn type_into<K: EntityKind>(page: &mut ListEditor<K>, fields: &[(&str, &str)]) {
    for (name, value) in fields {
        page.dispatch(ModalAction::UpdateField(InputEvent::text(*name, *value)))
            .unwrap();
    }
}

#[test]
fn creates_append_in_order_with_fresh_ids() {
    let (mut page, ids) = editor::<Ticket>();

    for name in ["Early Bird", "General", "VIP"] {
        page.open_create().unwrap();
        type_into(&mut page, &[("name", name)]);
        page.dispatch(ModalAction::Submit).unwrap();
    }

    let entries = page.entries();
    let names: Vec<_> = entries.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Early Bird", "General", "VIP"]);
    let expected: Vec<_> = (1..=3)
        .map(|n| Some(EntityId::from_uuid(Uuid::from_u128(n))))
        .collect();
    assert_eq!(entries.iter().map(|t| t.id).collect::<Vec<_>>(), expected);
    assert_eq!(ids.issued(), 3);
}

#[test]
fn edit_updates_in_place_without_new_id() {
    let (mut page, ids) = editor::<Ticket>();
    for name in ["A", "B", "C"] {
        page.open_create().unwrap();
        type_into(&mut page, &[("name", name)]);
        page.dispatch(ModalAction::Submit).unwrap();
    }
    let middle = page.entries()[1].id.unwrap();

    page.open_edit(middle).unwrap();
    assert_eq!(page.modal(|m: &ModalState<Ticket>| m.draft().unwrap().name.clone()), "B");
    type_into(&mut page, &[("name", "B2"), ("price", "40")]);
    page.dispatch(ModalAction::Submit).unwrap();

    let entries = page.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].name, "B2");
    assert_eq!(entries[1].price, "40");
    assert_eq!(entries[1].id, Some(middle));
    assert_eq!(ids.issued(), 3);
}

#[test]
fn edit_restores_sale_window_mode() {
    let (mut page, _) = editor::<Ticket>();
    page.open_create().unwrap();
    type_into(&mut page, &[("name", "Late"), ("saleAfterTicket", "Early Bird")]);
    page.dispatch(ModalAction::Submit).unwrap();
    let id = page.entries()[0].id.unwrap();

    page.open_edit(id).unwrap();

    assert_eq!(
        page.modal(|m: &ModalState<Ticket>| m.modes()),
        Some(TicketModes {
            sale_window: SaleWindowMode::BeforeAfter,
            ..TicketModes::default()
        })
    );
}

#[test]
fn invalid_discount_never_reaches_the_list() {
    let (mut page, ids) = editor::<DiscountCode>();

    page.open_create().unwrap();
    type_into(&mut page, &[("code", "X10"), ("discountPercentage", "abc")]);
    page.dispatch(ModalAction::Submit).unwrap();

    assert!(page.entries().is_empty());
    assert_eq!(ids.issued(), 0);
    let messages = page.modal(|m: &ModalState<DiscountCode>| {
        serde_json::to_value(m.errors().unwrap()).unwrap()
    });
    assert_eq!(
        messages,
        serde_json::json!({
            "discountPercentage": "Discount percentage must be a number",
            "maxDiscountAmount": "Max discount amount is required",
            "minDiscountAmount": "Min discount amount is required",
            "quantity": "Quantity is required",
        })
    );
}

#[test]
fn parent_json_opens_editor() {
    let (mut page, _) = editor::<DiscountCode>();
    let source: DiscountCodeSource = serde_json::from_str(
        r#"{"code":"VIP","discountPercentage":"20","maxDiscountAmount":"100","minDiscountAmount":"10","quantity":"5"}"#,
    )
    .unwrap();

    page.dispatch(ModalAction::Open { source }).unwrap();
    page.dispatch(ModalAction::Submit).unwrap();

    let entries = page.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].code, "VIP");
    assert_eq!(entries[0].status, "");
}

#[test]
fn empty_json_source_is_a_create() {
    let (mut page, _) = editor::<Ticket>();
    let source: TicketSource = serde_json::from_str("{}").unwrap();

    page.dispatch(ModalAction::Open { source }).unwrap();

    assert!(page.modal(ModalState::is_open));
    assert!(!page.modal(ModalState::is_edit));
}

#[test]
fn editing_a_removed_entity_fails() {
    let (mut page, _) = editor::<Ticket>();
    page.open_create().unwrap();
    page.dispatch(ModalAction::Submit).unwrap();
    let id = page.entries()[0].id.unwrap();
    page.remove(id).unwrap();

    assert_eq!(
        page.open_edit(id),
        Err(EditorError::NotFound { kind: "ticket", id })
    );
}
