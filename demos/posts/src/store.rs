//! Dispatch gateway and read accessor for loaded posts.

use crate::environment::{PostSource, PostsEnvironment};
use crate::reducer::PostsReducer;
use crate::types::{BlogPost, LoadStatus, PostsAction, PostsState};
use statekit_core::environment::{Clock, SystemClock};
use statekit_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;

/// Handle to the posts feature
///
/// Clones share one state and one source.
pub struct PostsStore<P: PostSource> {
    store: Store<PostsState, PostsAction, PostsEnvironment<P>, PostsReducer<P>>,
}

impl<P: PostSource> PostsStore<P> {
    /// Creates an idle store reading from `source`, stamped by the system clock
    #[must_use]
    pub fn new(source: P) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    /// Creates an idle store with an explicit clock
    #[must_use]
    pub fn with_clock(source: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Store::new(
                PostsState::default(),
                PostsReducer::new(),
                PostsEnvironment::new(source, clock),
            ),
        }
    }

    /// Requests a load
    ///
    /// Returns once the state shows `Loading`; the request itself runs in the
    /// background. Ignored if a load is already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn load(&self) -> Result<(), StoreError> {
        self.dispatch(PostsAction::Load).await
    }

    /// Requests a load and waits for it to settle
    ///
    /// Returns the status after the request finished. If a load was already
    /// in flight this call does not wait for it and returns `Loading`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ShutdownInProgress`]: store is shutting down
    /// - [`StoreError::Timeout`]: the request did not settle within `timeout`
    pub async fn load_and_wait(
        &self,
        timeout: Duration,
    ) -> Result<LoadStatus<Vec<BlogPost>>, StoreError> {
        let mut handle = self.store.send(PostsAction::Load).await?;
        handle.wait_with_timeout(timeout).await?;
        Ok(self.status().await)
    }

    /// Dispatches an already-built action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn dispatch(&self, action: PostsAction) -> Result<(), StoreError> {
        self.store.send(action).await?;
        Ok(())
    }

    /// Owned copy of the current snapshot
    pub async fn snapshot(&self) -> PostsState {
        self.store.snapshot().await
    }

    /// Current load status
    pub async fn status(&self) -> LoadStatus<Vec<BlogPost>> {
        self.store.state(|s| s.status.clone()).await
    }

    /// Loaded posts, if the last load succeeded
    pub async fn posts(&self) -> Option<Vec<BlogPost>> {
        self.store.state(|s| s.status.data().cloned()).await
    }

    /// Failure message, if the last load failed
    pub async fn error(&self) -> Option<String> {
        self.store
            .state(|s| s.status.error().map(str::to_string))
            .await
    }

    /// Whether a request is in flight
    pub async fn is_loading(&self) -> bool {
        self.store.state(|s| s.status.is_loading()).await
    }

    /// Access to the underlying store, e.g. for shutdown
    #[must_use]
    pub const fn store(&self) -> &Store<PostsState, PostsAction, PostsEnvironment<P>, PostsReducer<P>> {
        &self.store
    }
}

impl<P: PostSource> Clone for PostsStore<P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
