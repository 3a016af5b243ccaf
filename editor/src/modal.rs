//! Modal lifecycle for one entity kind.
//!
//! The modal is closed or open. While open it owns exactly one draft, the
//! field errors from the last failed submit, and the kind's toggle-machine
//! state. Closing drops all three at once.
//!
//! A successful submit describes two effects, in order: hand the draft to the
//! injected [`SaveHandler`], then feed [`ModalAction::Close`] back in.

use crate::field::{self, InputEvent};
use crate::kind::EntityKind;
use crate::validation::FieldErrors;
use draft_editor_core::environment::SaveHandler;
use draft_editor_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// Whether the modal is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No draft exists
    Closed,
    /// A draft is being edited
    Open,
}

/// Everything that lives only while the modal is open
#[derive(Clone, Debug)]
pub struct Session<K: EntityKind> {
    /// The working copy
    pub draft: K::Draft,
    /// Messages from the last failed submit, minus fields edited since
    pub errors: FieldErrors<K::Field>,
    /// Toggle-machine state
    pub modes: K::Modes,
    /// The source the draft was seeded from
    pub seeded_from: K::Source,
    /// Why the last input event could not be applied
    pub last_error: Option<String>,
}

impl<K: EntityKind> Session<K> {
    fn seed(source: K::Source) -> Self {
        let draft = K::seed(&source);
        Self {
            modes: K::modes_for(&draft),
            draft,
            errors: FieldErrors::new(),
            seeded_from: source,
            last_error: None,
        }
    }
}

/// State of one modal
#[derive(Clone, Debug)]
pub struct ModalState<K: EntityKind> {
    session: Option<Session<K>>,
}

impl<K: EntityKind> ModalState<K> {
    /// A closed modal
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Closed or open
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.session.is_some() {
            Phase::Open
        } else {
            Phase::Closed
        }
    }

    /// Whether a draft is being edited
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any
    #[must_use]
    pub const fn session(&self) -> Option<&Session<K>> {
        self.session.as_ref()
    }

    /// The draft being edited
    #[must_use]
    pub fn draft(&self) -> Option<&K::Draft> {
        self.session.as_ref().map(|s| &s.draft)
    }

    /// Errors to display next to fields
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors<K::Field>> {
        self.session.as_ref().map(|s| &s.errors)
    }

    /// Toggle-machine state
    #[must_use]
    pub fn modes(&self) -> Option<K::Modes> {
        self.session.as_ref().map(|s| s.modes)
    }

    /// Whether the draft is an edit of an existing entity
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.draft().and_then(K::draft_id).is_some()
    }
}

impl<K: EntityKind> Default for ModalState<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs to a modal
#[derive(Clone, Debug)]
pub enum ModalAction<K: EntityKind> {
    /// Open on `source` (the default source means "create"), seeding a fresh draft
    Open {
        /// Entity to edit
        source: K::Source,
    },

    /// The parent re-rendered the editor with these props
    ///
    /// Seeds when `is_open` turns true or when `source` changes while open;
    /// closes when `is_open` turns false.
    SyncProps {
        /// Entity the parent targets
        source: K::Source,
        /// Whether the parent wants the modal shown
        is_open: bool,
    },

    /// A control changed
    UpdateField(InputEvent),

    /// A mode selector changed
    Toggle(K::Toggle),

    /// The user pressed save
    Submit,

    /// Dismiss without saving
    Close,
}

/// Injected collaborators of a modal
pub struct ModalEnvironment<K: EntityKind> {
    /// Receives each successfully submitted draft (`onSave`)
    pub on_save: Arc<dyn SaveHandler<K::Draft>>,
}

impl<K: EntityKind> ModalEnvironment<K> {
    /// Creates a new `ModalEnvironment`
    #[must_use]
    pub fn new(on_save: Arc<dyn SaveHandler<K::Draft>>) -> Self {
        Self { on_save }
    }
}

impl<K: EntityKind> Clone for ModalEnvironment<K> {
    fn clone(&self) -> Self {
        Self {
            on_save: Arc::clone(&self.on_save),
        }
    }
}

/// Reducer for a modal editing entities of kind `K`
#[derive(Clone, Copy, Debug, Default)]
pub struct ModalReducer<K>(PhantomData<K>);

impl<K: EntityKind> ModalReducer<K> {
    /// Creates a new `ModalReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    fn open(state: &mut ModalState<K>, source: K::Source) {
        tracing::debug!(kind = K::NAME, ?source, "Seeding draft");
        state.session = Some(Session::seed(source));
    }

    fn close(state: &mut ModalState<K>) {
        if state.session.take().is_some() {
            tracing::debug!(kind = K::NAME, "Modal closed, draft discarded");
        }
    }

    fn update_field(session: &mut Session<K>, event: &InputEvent) {
        let mut draft = session.draft.clone();
        match field::apply_event::<K>(&mut draft, event) {
            Ok(target) => {
                session.draft = draft;
                session.errors.clear_field(&target);
                session.last_error = None;
            },
            Err(error) => {
                tracing::warn!(kind = K::NAME, %error, "Input event rejected");
                session.last_error = Some(error.to_string());
            },
        }
    }

    fn submit(
        session: &mut Session<K>,
        env: &ModalEnvironment<K>,
    ) -> SmallVec<[Effect<ModalAction<K>>; 4]> {
        if let Some(errors) = K::validate(&session.draft) {
            if !errors.is_empty() {
                tracing::debug!(kind = K::NAME, failing = errors.len(), "Submit blocked by validation");
                session.errors = errors;
                return SmallVec::new();
            }
        }
        session.errors = FieldErrors::new();

        let draft = session.draft.clone();
        let on_save = Arc::clone(&env.on_save);
        tracing::info!(
            kind = K::NAME,
            update = K::draft_id(&draft).is_some(),
            "Committing draft"
        );

        smallvec![Effect::chain(vec![
            Effect::run(move || {
                on_save.save(draft);
                None
            }),
            Effect::dispatch(ModalAction::Close),
        ])]
    }
}

impl<K: EntityKind> Reducer for ModalReducer<K> {
    type State = ModalState<K>;
    type Action = ModalAction<K>;
    type Environment = ModalEnvironment<K>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ModalAction::Open { source } => {
                Self::open(state, source);
                SmallVec::new()
            },

            ModalAction::SyncProps { source, is_open } => {
                let same_target = state
                    .session
                    .as_ref()
                    .map(|session| session.seeded_from == source);
                match (same_target, is_open) {
                    (Some(_), false) => Self::close(state),
                    (None | Some(false), true) => Self::open(state, source),
                    (Some(true), true) | (None, false) => {},
                }
                SmallVec::new()
            },

            ModalAction::UpdateField(event) => {
                match state.session.as_mut() {
                    Some(session) => Self::update_field(session, &event),
                    None => {
                        tracing::warn!(kind = K::NAME, field = %event.name, "Input ignored while closed");
                    },
                }
                SmallVec::new()
            },

            ModalAction::Toggle(toggle) => {
                match state.session.as_mut() {
                    Some(session) => {
                        let (modes, draft) =
                            K::apply_toggle(session.modes, session.draft.clone(), toggle);
                        tracing::debug!(kind = K::NAME, ?modes, "Mode toggled");
                        session.modes = modes;
                        session.draft = draft;
                    },
                    None => {
                        tracing::warn!(kind = K::NAME, ?toggle, "Toggle ignored while closed");
                    },
                }
                SmallVec::new()
            },

            ModalAction::Submit => match state.session.as_mut() {
                Some(session) => Self::submit(session, env),
                None => {
                    tracing::warn!(kind = K::NAME, "Submit ignored while closed");
                    SmallVec::new()
                },
            },

            ModalAction::Close => {
                Self::close(state);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::kind::{DiscountCode, Ticket};
    use crate::toggle::{NO_LIMIT, QuantityMode, SaleWindowMode, TicketModes, TicketToggle};
    use crate::types::{DiscountCodeField, DiscountCodeSource, EntityId, TicketSource};
    use draft_editor_testing::{RecordingSaveHandler, ReducerTest, assertions};
    use uuid::Uuid;

    fn env<K: EntityKind>() -> ModalEnvironment<K> {
        ModalEnvironment::new(Arc::new(RecordingSaveHandler::<K::Draft>::new()))
    }

    fn ticket_named(name: &str) -> TicketSource {
        TicketSource {
            id: Some(EntityId::from_uuid(Uuid::new_v4())),
            name: Some(name.to_string()),
            ..TicketSource::default()
        }
    }

    fn valid_code() -> DiscountCodeSource {
        DiscountCodeSource {
            code: Some("X10".to_string()),
            discount_percentage: Some("10".to_string()),
            max_discount_amount: Some("5".to_string()),
            min_discount_amount: Some("0".to_string()),
            quantity: Some("10".to_string()),
            ..DiscountCodeSource::default()
        }
    }

    #[test]
    fn open_with_empty_source_seeds_template() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .when_action(ModalAction::Open {
                source: TicketSource::default(),
            })
            .then_state(|state| {
                assert_eq!(state.phase(), Phase::Open);
                assert_eq!(state.draft(), Some(&Ticket::template()));
                assert_eq!(state.modes(), Some(TicketModes::default()));
                assert!(!state.is_edit());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn open_derives_modes_from_source() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .when_action(ModalAction::Open {
                source: TicketSource {
                    quantity: Some(NO_LIMIT.to_string()),
                    sale_after_ticket: Some("general".to_string()),
                    ..TicketSource::default()
                },
            })
            .then_state(|state| {
                assert_eq!(
                    state.modes(),
                    Some(TicketModes {
                        quantity: QuantityMode::Unlimited,
                        sale_window: SaleWindowMode::BeforeAfter,
                    })
                );
            })
            .run();
    }

    #[test]
    fn reopening_resets_errors_and_draft() {
        ReducerTest::new(ModalReducer::<DiscountCode>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![
                ModalAction::Open {
                    source: DiscountCodeSource::default(),
                },
                ModalAction::UpdateField(InputEvent::text("code", "STALE")),
                ModalAction::Submit,
            ])
            .when_action(ModalAction::Open {
                source: valid_code(),
            })
            .then_state(|state| {
                assert!(state.errors().unwrap().is_empty());
                assert_eq!(state.draft().unwrap().code, "X10");
            })
            .run();
    }

    #[test]
    fn close_discards_everything() {
        ReducerTest::new(ModalReducer::<DiscountCode>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![
                ModalAction::Open {
                    source: DiscountCodeSource::default(),
                },
                ModalAction::Submit,
            ])
            .when_action(ModalAction::Close)
            .then_state(|state| {
                assert_eq!(state.phase(), Phase::Closed);
                assert!(state.draft().is_none());
                assert!(state.errors().is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn invalid_submit_stays_open_with_errors() {
        ReducerTest::new(ModalReducer::<DiscountCode>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![ModalAction::Open {
                source: DiscountCodeSource {
                    code: Some(String::new()),
                    ..valid_code()
                },
            }])
            .when_action(ModalAction::Submit)
            .then_state(|state| {
                assert!(state.is_open());
                let errors = state.errors().unwrap();
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.get(&DiscountCodeField::Code), Some("Code is required"));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn valid_submit_saves_then_closes() {
        ReducerTest::new(ModalReducer::<DiscountCode>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![ModalAction::Open {
                source: valid_code(),
            }])
            .when_action(ModalAction::Submit)
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_run_effect(effects);
                assertions::assert_dispatches(effects, |a| matches!(a, ModalAction::Close));
            })
            .run();
    }

    #[test]
    fn ticket_submit_never_validates() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![ModalAction::Open {
                source: TicketSource {
                    price: Some("not a price".to_string()),
                    ..TicketSource::default()
                },
            }])
            .when_action(ModalAction::Submit)
            .then_state(|state| assert!(state.errors().unwrap().is_empty()))
            .then_effects(assertions::assert_has_run_effect)
            .run();
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        ReducerTest::new(ModalReducer::<DiscountCode>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![
                ModalAction::Open {
                    source: DiscountCodeSource::default(),
                },
                ModalAction::Submit,
            ])
            .when_action(ModalAction::UpdateField(InputEvent::text("quantity", "abc")))
            .then_state(|state| {
                let errors = state.errors().unwrap();
                assert!(!errors.contains(&DiscountCodeField::Quantity));
                assert!(errors.contains(&DiscountCodeField::Code));
                assert_eq!(errors.len(), 4);
                assert_eq!(state.draft().unwrap().quantity, "abc");
            })
            .run();
    }

    #[test]
    fn rejected_input_is_recorded_and_draft_kept() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![ModalAction::Open {
                source: ticket_named("VIP"),
            }])
            .when_action(ModalAction::UpdateField(InputEvent::text("colour", "red")))
            .then_state(|state| {
                let session = state.session().unwrap();
                assert!(session.last_error.as_ref().unwrap().contains("colour"));
                assert_eq!(session.draft.name, "VIP");
            })
            .run();
    }

    #[test]
    fn mismatched_input_keeps_field_error() {
        ReducerTest::new(ModalReducer::<DiscountCode>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![
                ModalAction::Open {
                    source: DiscountCodeSource::default(),
                },
                ModalAction::Submit,
            ])
            .when_action(ModalAction::UpdateField(InputEvent::checkbox("code", true)))
            .then_state(|state| {
                let session = state.session().unwrap();
                assert!(session.errors.contains(&DiscountCodeField::Code));
                assert!(session.last_error.is_some());
                assert_eq!(session.draft.code, "");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn input_while_closed_is_ignored() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .when_action(ModalAction::UpdateField(InputEvent::text("name", "VIP")))
            .then_state(|state| assert!(!state.is_open()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submit_while_closed_does_nothing() {
        ReducerTest::new(ModalReducer::<DiscountCode>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .when_action(ModalAction::Submit)
            .then_state(|state| assert!(!state.is_open()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn quantity_toggle_round_trip() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![
                ModalAction::Open {
                    source: TicketSource::default(),
                },
                ModalAction::UpdateField(InputEvent::text("quantity", "50")),
                ModalAction::Toggle(TicketToggle::Quantity(QuantityMode::Unlimited)),
            ])
            .when_action(ModalAction::Toggle(TicketToggle::Quantity(QuantityMode::Limited)))
            .then_state(|state| {
                assert_eq!(state.draft().unwrap().quantity, "");
                assert_eq!(state.modes().unwrap().quantity, QuantityMode::Limited);
            })
            .run();
    }

    #[test]
    fn sync_props_reseeds_on_new_target() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![
                ModalAction::SyncProps {
                    source: ticket_named("A"),
                    is_open: true,
                },
                ModalAction::UpdateField(InputEvent::text("price", "99")),
            ])
            .when_action(ModalAction::SyncProps {
                source: ticket_named("B"),
                is_open: true,
            })
            .then_state(|state| {
                let draft = state.draft().unwrap();
                assert_eq!(draft.name, "B");
                assert_eq!(draft.price, "");
            })
            .run();
    }

    #[test]
    fn sync_props_keeps_edits_for_same_target() {
        let source = ticket_named("A");

        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![
                ModalAction::SyncProps {
                    source: source.clone(),
                    is_open: true,
                },
                ModalAction::UpdateField(InputEvent::text("price", "99")),
            ])
            .when_action(ModalAction::SyncProps {
                source,
                is_open: true,
            })
            .then_state(|state| assert_eq!(state.draft().unwrap().price, "99"))
            .run();
    }

    #[test]
    fn sync_props_switching_to_create_reseeds() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![ModalAction::SyncProps {
                source: ticket_named("A"),
                is_open: true,
            }])
            .when_action(ModalAction::SyncProps {
                source: TicketSource::default(),
                is_open: true,
            })
            .then_state(|state| assert_eq!(state.draft(), Some(&Ticket::template())))
            .run();
    }

    #[test]
    fn sync_props_closed_flag_closes() {
        ReducerTest::new(ModalReducer::<Ticket>::new())
            .with_env(env())
            .given_state(ModalState::new())
            .given_actions(vec![ModalAction::SyncProps {
                source: ticket_named("A"),
                is_open: true,
            }])
            .when_action(ModalAction::SyncProps {
                source: ticket_named("A"),
                is_open: false,
            })
            .then_state(|state| assert_eq!(state.phase(), Phase::Closed))
            .run();
    }
}
