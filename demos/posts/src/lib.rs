//! # Posts
//!
//! Loads a list of blog posts from a remote source and tracks the request as
//! `Idle`, `Loading`, `Failed` or `Loaded`.
//!
//! The reducer stays pure: `Load` returns an effect that calls the injected
//! [`PostSource`], and the result comes back as a `Loaded` or `Failed` action.
//!
//! ## Example
//!
//! ```no_run
//! use posts::{HttpPostSource, PostsConfig, PostsStore};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpPostSource::from_config(&PostsConfig::from_env())?;
//! let posts = PostsStore::new(source);
//!
//! let status = posts.load_and_wait(Duration::from_secs(10)).await?;
//! println!("{status:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod mocks;
pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::PostsConfig;
pub use environment::{HttpPostSource, PostSource, PostSourceError, PostsEnvironment};
pub use reducer::PostsReducer;
pub use store::PostsStore;
pub use types::{BlogPost, LoadStatus, PostsAction, PostsState};
