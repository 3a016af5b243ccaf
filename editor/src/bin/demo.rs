//! Event editor demo binary
//!
//! Drives the ticket and discount-code editors through a scripted session
//! and prints the resulting lists as JSON.

use anyhow::Context;
use draft_editor_core::environment::UuidV4Generator;
use event_editor::config::DemoConfig;
use event_editor::{
    DiscountCode, InputEvent, InputKind, ListEditor, ModalAction, ModalState, QuantityMode,
    SaleWindowMode, Ticket, TicketToggle,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::from_env().context("loading demo configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| event_editor::config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Event Editor Demo ({} scenario) ===\n", config.scenario);

    if config.scenario.includes_tickets() {
        run_tickets(&config)?;
    }
    if config.scenario.includes_discounts() {
        run_discounts(&config)?;
    }

    Ok(())
}

fn run_tickets(config: &DemoConfig) -> anyhow::Result<()> {
    let mut page = ListEditor::<Ticket>::with_config(Arc::new(UuidV4Generator), config.store_config());

    println!(">>> Creating an unlimited early-bird ticket");
    page.open_create()?;
    for event in [
        InputEvent::text("name", "Early Bird"),
        InputEvent::new("price", "25", InputKind::Number),
        InputEvent::new("salesStartDate", "2026-11-01", InputKind::Date),
        InputEvent::new("salesEndDate", "2026-11-30", InputKind::Date),
        InputEvent::checkbox("isAdvance", true),
        InputEvent::new("advanceAmount", "5", InputKind::Number),
    ] {
        page.dispatch(ModalAction::UpdateField(event))?;
    }
    page.dispatch(ModalAction::Toggle(TicketToggle::Quantity(QuantityMode::Unlimited)))?;
    page.dispatch(ModalAction::Submit)?;

    println!(">>> Creating a general ticket that goes on sale after early bird");
    page.open_create()?;
    page.dispatch(ModalAction::UpdateField(InputEvent::text("name", "General")))?;
    page.dispatch(ModalAction::UpdateField(InputEvent::new("quantity", "200", InputKind::Number)))?;
    page.dispatch(ModalAction::Toggle(TicketToggle::SaleWindow(SaleWindowMode::BeforeAfter)))?;
    page.dispatch(ModalAction::UpdateField(InputEvent::new(
        "saleAfterTicket",
        "Early Bird",
        InputKind::Select,
    )))?;
    page.dispatch(ModalAction::Submit)?;

    let first = page
        .entries()
        .first()
        .and_then(|ticket| ticket.id)
        .context("early bird ticket was not committed")?;

    println!(">>> Editing the early-bird price");
    page.open_edit(first)?;
    page.dispatch(ModalAction::UpdateField(InputEvent::new("price", "20", InputKind::Number)))?;
    page.dispatch(ModalAction::Submit)?;

    println!("\nTickets:");
    println!("{}", serde_json::to_string_pretty(&page.entries())?);
    Ok(())
}

fn run_discounts(config: &DemoConfig) -> anyhow::Result<()> {
    let mut page =
        ListEditor::<DiscountCode>::with_config(Arc::new(UuidV4Generator), config.store_config());

    println!("\n>>> Submitting an incomplete discount code");
    page.open_create()?;
    page.dispatch(ModalAction::UpdateField(InputEvent::new(
        "discountPercentage",
        "150",
        InputKind::Number,
    )))?;
    page.dispatch(ModalAction::Submit)?;

    let errors = page.modal(|modal: &ModalState<DiscountCode>| modal.errors().cloned());
    println!("Errors:");
    println!("{}", serde_json::to_string_pretty(&errors)?);

    println!("\n>>> Fixing the fields and resubmitting");
    for (name, value) in [
        ("code", "SPRING10"),
        ("discountPercentage", "10"),
        ("maxDiscountAmount", "50"),
        ("minDiscountAmount", "0"),
        ("quantity", "100"),
    ] {
        page.dispatch(ModalAction::UpdateField(InputEvent::new(name, value, InputKind::Text)))?;
    }
    page.dispatch(ModalAction::Submit)?;

    println!("\nDiscount codes:");
    println!("{}", serde_json::to_string_pretty(&page.entries())?);
    Ok(())
}
