//! Domain types for the timers board.

use serde::{Deserialize, Serialize};

/// A named timer definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Display name
    pub name: String,
    /// Duration in seconds
    pub duration: u64,
}

impl Timer {
    /// Creates a timer definition
    #[must_use]
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Timers snapshot
///
/// A fresh board is running with no timers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimersState {
    /// Whether timers are currently running
    pub is_running: bool,
    /// Timers in the order they were added
    pub timers: Vec<Timer>,
}

impl TimersState {
    /// Creates a running board with no timers
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_running: true,
            timers: Vec::new(),
        }
    }

    /// Sum of all timer durations, in seconds, saturating at `u64::MAX`
    #[must_use]
    pub fn total_duration(&self) -> u64 {
        self.timers
            .iter()
            .fold(0_u64, |acc, t| acc.saturating_add(t.duration))
    }
}

impl Default for TimersState {
    fn default() -> Self {
        Self::new()
    }
}

/// Timers actions
///
/// Tagged by `"type"` on the wire: `START`, `STOP`,
/// `{"type":"ADD_TIMER","name":"t1","duration":60}`.
/// Any other tag decodes to [`TimersAction::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimersAction {
    /// Set the run flag
    Start,
    /// Clear the run flag
    Stop,
    /// Append a timer
    AddTimer {
        /// Display name
        name: String,
        /// Duration in seconds
        duration: u64,
    },
    /// Unrecognized action kind; never changes the board
    #[serde(other)]
    Unknown,
}

impl TimersAction {
    /// Shorthand for [`TimersAction::AddTimer`]
    #[must_use]
    pub fn add(name: impl Into<String>, duration: u64) -> Self {
        Self::AddTimer {
            name: name.into(),
            duration,
        }
    }

    /// Decodes an action from its JSON form
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` for malformed input or a known kind with
    /// missing or mistyped payload fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
