//! Dispatch gateway and read accessor for a timers board.

use crate::reducer::{TimersEnvironment, TimersReducer};
use crate::types::{Timer, TimersAction, TimersState};
use statekit_runtime::{Store, StoreError};
use thiserror::Error;

/// Errors surfaced by the timers gateway
#[derive(Error, Debug)]
pub enum TimersError {
    /// A boundary payload could not be decoded into an action
    #[error("Invalid timers action: {0}")]
    Decode(#[from] serde_json::Error),

    /// The underlying store rejected the dispatch
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle to a timers board
///
/// Clones share one board.
#[derive(Clone)]
pub struct TimersStore {
    store: Store<TimersState, TimersAction, TimersEnvironment, TimersReducer>,
}

impl TimersStore {
    /// Creates a store holding a running, empty board
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(TimersState::new())
    }

    /// Creates a store starting from the given snapshot
    #[must_use]
    pub fn with_state(initial: TimersState) -> Self {
        Self {
            store: Store::new(initial, TimersReducer::new(), TimersEnvironment),
        }
    }

    /// Sets the run flag
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn start(&self) -> Result<(), StoreError> {
        self.dispatch(TimersAction::Start).await
    }

    /// Clears the run flag
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn stop(&self) -> Result<(), StoreError> {
        self.dispatch(TimersAction::Stop).await
    }

    /// Appends a timer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn add_timer(&self, name: impl Into<String>, duration: u64) -> Result<(), StoreError> {
        self.dispatch(TimersAction::add(name, duration)).await
    }

    /// Dispatches an already-built action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn dispatch(&self, action: TimersAction) -> Result<(), StoreError> {
        self.store.send(action).await?;
        Ok(())
    }

    /// Decodes a JSON action and dispatches it
    ///
    /// # Errors
    ///
    /// Returns [`TimersError::Decode`] for malformed input and
    /// [`TimersError::Store`] if the store rejects the dispatch.
    pub async fn dispatch_json(&self, json: &str) -> Result<(), TimersError> {
        self.dispatch(TimersAction::from_json(json)?).await?;
        Ok(())
    }

    /// Owned copy of the current snapshot
    pub async fn snapshot(&self) -> TimersState {
        self.store.snapshot().await
    }

    /// Whether the board is running
    pub async fn is_running(&self) -> bool {
        self.store.state(|s| s.is_running).await
    }

    /// Timers in insertion order
    pub async fn timers(&self) -> Vec<Timer> {
        self.store.state(|s| s.timers.clone()).await
    }

    /// Sum of all timer durations, in seconds
    pub async fn total_duration(&self) -> u64 {
        self.store.state(TimersState::total_duration).await
    }

    /// Access to the underlying store, e.g. for shutdown
    #[must_use]
    pub const fn store(&self) -> &Store<TimersState, TimersAction, TimersEnvironment, TimersReducer> {
        &self.store
    }
}

impl Default for TimersStore {
    fn default() -> Self {
        Self::new()
    }
}
