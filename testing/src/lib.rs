//! # Draft Editor Testing
//!
//! Testing utilities and helpers for reducer-driven draft editors.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use draft_editor_testing::mocks::RecordingSaveHandler;
//! use draft_editor_runtime::Store;
//!
//! let saved = Arc::new(RecordingSaveHandler::new());
//! let mut store = Store::new(ModalState::default(), ModalReducer::new(), env(saved.clone()));
//!
//! store.send(ModalAction::Submit)?;
//! assert_eq!(saved.count(), 1);
//! ```

use draft_editor_core::environment::{IdGenerator, SaveHandler};


/// Mock implementations for testing.
pub mod mocks {
    #![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
    #![allow(clippy::missing_panics_doc)]

    use super::{IdGenerator, SaveHandler};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Predictable ids for deterministic tests
    ///
    /// Yields `00000000-0000-0000-0000-000000000001`, then `...0002`, and so on.
    ///
    /// # Example
    ///
    /// ```
    /// use draft_editor_testing::mocks::SequentialIdGenerator;
    /// use draft_editor_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        issued: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                issued: AtomicU64::new(0),
            }
        }

        /// How many ids have been handed out
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.issued.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u128(u128::from(n))
        }
    }

    /// Save handler that records every committed draft
    ///
    /// Use it to assert that a submit called `onSave` exactly once and
    /// with which draft.
    #[derive(Debug)]
    pub struct RecordingSaveHandler<D> {
        saved: Mutex<Vec<D>>,
    }

    impl<D> RecordingSaveHandler<D> {
        /// Create an empty recorder
        #[must_use]
        pub const fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
            }
        }

        /// Number of save calls so far
        #[must_use]
        pub fn count(&self) -> usize {
            self.saved.lock().unwrap().len()
        }

        /// Forget every recorded draft
        pub fn clear(&self) {
            self.saved.lock().unwrap().clear();
        }
    }

    impl<D: Clone> RecordingSaveHandler<D> {
        /// Every draft saved so far, oldest first
        #[must_use]
        pub fn saved(&self) -> Vec<D> {
            self.saved.lock().unwrap().clone()
        }

        /// The most recently saved draft
        #[must_use]
        pub fn last(&self) -> Option<D> {
            self.saved.lock().unwrap().last().cloned()
        }
    }

    impl<D> Default for RecordingSaveHandler<D> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<D: Send> SaveHandler<D> for RecordingSaveHandler<D> {
        fn save(&self, draft: D) {
            self.saved.lock().unwrap().push(draft);
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a test-friendly `tracing` subscriber
    ///
    /// Output goes through the libtest capture, filtered by `RUST_LOG`
    /// (default `debug`). Safe to call from every test; only the first call
    /// installs anything.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use mocks::{RecordingSaveHandler, SequentialIdGenerator};
pub use reducer_test::{ReducerTest, assertions};
