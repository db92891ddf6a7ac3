//! # Timers
//!
//! A board of named timers with a single run flag.
//!
//! ## Example
//!
//! ```no_run
//! use timers::TimersStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let board = TimersStore::new();
//! board.stop().await?;
//! board.add_timer("t1", 60).await?;
//!
//! assert!(!board.is_running().await);
//! assert_eq!(board.timers().await.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use reducer::{TimersEnvironment, TimersReducer};
pub use store::{TimersError, TimersStore};
pub use types::{Timer, TimersAction, TimersState};
