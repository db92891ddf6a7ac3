//! Reducer logic for the timers board.
//!
//! Three transitions: `Start` and `Stop` toggle the run flag without touching
//! the timer list, `AddTimer` appends without touching the flag.

use crate::types::{Timer, TimersAction, TimersState};
use statekit_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment for the timers reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct TimersEnvironment;

/// Reducer for the timers board
#[derive(Debug, Clone, Copy, Default)]
pub struct TimersReducer;

impl TimersReducer {
    /// Creates a new `TimersReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TimersReducer {
    type State = TimersState;
    type Action = TimersAction;
    type Environment = TimersEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TimersAction::Start => state.is_running = true,
            TimersAction::Stop => state.is_running = false,
            TimersAction::AddTimer { name, duration } => {
                tracing::debug!(%name, duration, "Adding timer");
                state.timers.push(Timer { name, duration });
            },
            TimersAction::Unknown => tracing::debug!("Ignoring unknown timers action"),
        }

        smallvec![Effect::None]
    }
}
