//! # Draft Editor Runtime
//!
//! Runtime implementation for reducer-driven draft editors.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to the reducer
//! - **Action Queue**: Manages the action → reducer → effects → action feedback loop
//!
//! Each processed action increments `store.commands.total` and every executed
//! effect increments `store.effects.executed{type=..}` through the `metrics`
//! facade; install a recorder to export them.
//!
//! Everything runs on the caller's thread. `send` returns only after the
//! action and every action it caused have been reduced.
//!
//! ## Example
//!
//! ```ignore
//! use draft_editor_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use draft_editor_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept producing actions past the configured budget
        ///
        /// The state reflects every action reduced before the limit was hit.
        #[error("Feedback loop: more than {limit} actions produced by a single send")]
        FeedbackLoop {
            /// The configured per-send action budget
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use draft_editor_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_actions_per_send(16);
/// assert_eq!(config.max_actions_per_send, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions (the sent one included) reduced by one `send`
    pub max_actions_per_send: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_actions_per_send: usize) -> Self {
        Self {
            max_actions_per_send,
        }
    }

    /// Set the per-send action budget
    #[must_use]
    pub const fn with_max_actions_per_send(mut self, limit: usize) -> Self {
        self.max_actions_per_send = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_actions_per_send: 64,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Effect, Reducer, StoreConfig, StoreError, VecDeque};
    use std::time::Instant;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store owns:
    /// - State
    /// - Reducer
    /// - Environment
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer type
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new Store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Reduces the action, executes the returned effects in order, and
        /// keeps reducing any actions those effects feed back (FIFO) until
        /// the queue is empty.
        ///
        /// # Returns
        ///
        /// The number of actions reduced, the sent one included.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLoop`] when more actions than
        /// [`StoreConfig::max_actions_per_send`] would be reduced.
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let limit = self.config.max_actions_per_send;
            let mut queue = VecDeque::from([action]);
            let mut processed = 0;

            while let Some(action) = queue.pop_front() {
                if processed >= limit {
                    tracing::warn!(limit, pending = queue.len() + 1, "Action budget exceeded");
                    metrics::counter!("store.feedback_loop.total").increment(1);
                    return Err(StoreError::FeedbackLoop { limit });
                }
                processed += 1;

                tracing::debug!(?action, "Processing action");
                metrics::counter!("store.commands.total").increment(1);

                let start = Instant::now();
                let effects = self
                    .reducer
                    .reduce(&mut self.state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                // Precision loss acceptable for metrics (effect counts < 2^52)
                #[allow(clippy::cast_precision_loss)]
                metrics::histogram!("store.effects.count").record(effects.len() as f64);

                for effect in effects {
                    Self::execute_effect(effect, &mut queue);
                }
            }

            Ok(processed)
        }

        fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                    for effect in effects {
                        Self::execute_effect(effect, queue);
                    }
                },
                Effect::Dispatch(action) => {
                    tracing::trace!("Executing Effect::Dispatch");
                    metrics::counter!("store.effects.executed", "type" => "dispatch").increment(1);
                    queue.push_back(*action);
                },
                Effect::Run(task) => {
                    tracing::trace!("Executing Effect::Run");
                    metrics::counter!("store.effects.executed", "type" => "run").increment(1);
                    if let Some(action) = task() {
                        tracing::trace!("Effect::Run produced an action, queueing");
                        queue.push_back(action);
                    }
                },
            }
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let is_open = store.state(|s| s.is_open());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Borrow the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Tear the store down into its state and environment
        #[must_use]
        pub fn into_parts(self) -> (S, E) {
            (self.state, self.environment)
        }
    }
}

pub use store::Store;
