//! # statekit core
//!
//! Core traits and types for reducer-based state containers.
//!
//! A feature is described by four pieces:
//!
//! - **State**: an owned snapshot of everything the feature knows
//! - **Action**: a sum type of every intended state change
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Environment**: injected dependencies (clocks, data sources)
//!
//! Reducers never perform I/O. Anything asynchronous is returned as an
//! [`effect::Effect`] description and executed by the runtime crate.
//!
//! ## Example
//!
//! ```
//! use statekit_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Switch {
//!     on: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum SwitchAction {
//!     Toggle,
//! }
//!
//! struct SwitchReducer;
//!
//! impl Reducer for SwitchReducer {
//!     type State = Switch;
//!     type Action = SwitchAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Switch,
//!         action: SwitchAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<SwitchAction>; 4]> {
//!         match action {
//!             SwitchAction::Toggle => state.on = !state.on,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = Switch::default();
//! SwitchReducer.reduce(&mut state, SwitchAction::Toggle, &());
//! assert!(state.on);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They are deterministic and testable without a runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The snapshot this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Implementations must be total over `Action`. An action that carries no
    /// meaning for the current state leaves it untouched rather than failing.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Most reducers return a
        /// single `Effect::None`, so the inline capacity of four avoids
        /// allocating in the common case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values, not execution. The runtime decides when and where
/// they run.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation that may feed an action back
        #[must_use]
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Returns `true` if this effect does nothing when executed
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use statekit_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let _now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[test]
    fn none_is_a_no_op() {
        assert!(Effect::<()>::None.is_none());
    }

    #[test]
    fn future_is_not_a_no_op() {
        let effect = Effect::<u8>::future(async { Some(1) });
        assert!(!effect.is_none());
    }

    #[test]
    fn debug_hides_future_body() {
        let effect = Effect::<u8>::future(async { None });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[tokio::test]
    async fn future_effect_yields_action() {
        let Effect::Future(fut) = Effect::<u8>::future(async { Some(7) }) else {
            unreachable!("constructed as a future")
        };
        assert_eq!(fut.await, Some(7));
    }
}
