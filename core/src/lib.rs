//! # Draft Editor Core
//!
//! Core traits and types for reducer-driven draft editors.
//!
//! Every editor in this workspace is a small state machine expressed as a
//! reducer: a pure function that takes the current state and one user action,
//! updates the state in place, and returns descriptions of the side effects
//! that should follow. The runtime crate executes those descriptions.
//!
//! ## Core Concepts
//!
//! - **State**: The editor state (open/closed, draft, field errors)
//! - **Action**: Every discrete user input (open, edit a field, toggle, submit, close)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected collaborators via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Synchronous: every action completes before the next one is processed
//!
//! ## Example
//!
//! ```ignore
//! use draft_editor_core::*;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         state.count += 1;
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for editor logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state-transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for editor logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected collaborators this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected collaborators
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action against the current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution); the reducer never calls a collaborator
/// directly.
pub mod effect {
    /// A deferred synchronous computation that may feed an action back.
    pub type Task<Action> = Box<dyn FnOnce() -> Option<Action>>;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),

        /// Feed an action straight back into the reducer
        Dispatch(Box<Action>),

        /// Arbitrary synchronous computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Run(Task<Action>),
    }

    // Manual Debug implementation since closures don't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Dispatch(action) => {
                    f.debug_tuple("Effect::Dispatch").field(action).finish()
                },
                Effect::Run(_) => write!(f, "Effect::Run(<task>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Feed `action` back into the reducer once the current effects are done
        #[must_use]
        pub fn dispatch(action: Action) -> Effect<Action> {
            Effect::Dispatch(Box::new(action))
        }

        /// Wrap a synchronous side effect
        #[must_use]
        pub fn run<F>(task: F) -> Effect<Action>
        where
            F: FnOnce() -> Option<Action> + 'static,
        {
            Effect::Run(Box::new(task))
        }

        /// Whether this effect (or any nested effect) does something
        #[must_use]
        pub fn is_noop(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_noop),
                Effect::Dispatch(_) | Effect::Run(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external collaborators are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use uuid::Uuid;

    /// Id generator - abstracts identifier creation for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - random v4 ids
    /// let ids = UuidV4Generator;
    ///
    /// // Test - predictable ids (see the testing crate)
    /// let ids = SequentialIdGenerator::new();
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier, never returned before
        fn next_id(&self) -> Uuid;
    }

    /// Random (v4) identifiers
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidV4Generator;

    impl IdGenerator for UuidV4Generator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }

    /// Receives a committed draft (the `onSave` side of an editor)
    ///
    /// Implementations decide what "commit" means: append to a list,
    /// replace an entry in place, or just record the call in tests.
    pub trait SaveHandler<D>: Send + Sync {
        /// Accept a draft that passed the editor's submit checks
        fn save(&self, draft: D);
    }
}
