//! # statekit testing
//!
//! Testing utilities and helpers for reducers and stores.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Helpers for driving a [`Store`](statekit_runtime::Store) through a script
//!
//! ## Example
//!
//! ```ignore
//! use statekit_testing::ReducerTest;
//!
//! ReducerTest::new(CartReducer::new())
//!     .with_env(CartEnvironment)
//!     .given_state(CartState::default())
//!     .when_action(CartAction::add("a", "Widget", 9.99))
//!     .then_state(|state| assert_eq!(state.items.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use statekit_core::environment::Clock;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use statekit_testing::mocks::FixedClock;
    /// use statekit_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen
    /// for the literal used here.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities
pub mod helpers {
    use statekit_core::reducer::Reducer;
    use statekit_runtime::{Store, StoreError};

    /// Fold a sequence of actions through a reducer, discarding effects
    ///
    /// Handy for property tests where only the final snapshot matters.
    pub fn reduce_all<R, I>(reducer: &R, state: &mut R::State, actions: I, env: &R::Environment)
    where
        R: Reducer,
        I: IntoIterator<Item = R::Action>,
    {
        for action in actions {
            let _ = reducer.reduce(state, action, env);
        }
    }

    /// Send each action to the store in order, waiting for its effects
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] produced by `send`.
    pub async fn dispatch_all<S, A, E, R, I>(
        store: &Store<S, A, E, R>,
        actions: I,
    ) -> Result<(), StoreError>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
        I: IntoIterator<Item = A>,
    {
        for action in actions {
            store.send(action).await?.wait().await;
        }
        Ok(())
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
