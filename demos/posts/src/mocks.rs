//! Mock post source for testing.
//!
//! Counts calls and can be held open until released, so tests can observe the
//! `Loading` state deterministically.

use crate::environment::{PostSource, PostSourceError};
use crate::types::BlogPost;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Mock post source
///
/// Clones share the call counter and the gate.
#[derive(Debug, Clone)]
pub struct MockPostSource {
    outcome: Result<Vec<BlogPost>, u16>,
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl MockPostSource {
    /// Source that returns the given posts
    #[must_use]
    pub fn succeeding(posts: Vec<BlogPost>) -> Self {
        Self {
            outcome: Ok(posts),
            calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Source that fails with the given HTTP status
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self {
            outcome: Err(status),
            calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Hold every fetch until [`release`](Self::release) is called
    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one held fetch complete
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Number of fetches started so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PostSource for MockPostSource {
    async fn fetch_posts(&self) -> Result<Vec<BlogPost>, PostSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.outcome.clone().map_err(PostSourceError::Status)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn test_succeeding_source() {
        let source = MockPostSource::succeeding(vec![]);
        assert!(source.fetch_posts().await.unwrap().is_empty());
        assert!(source.fetch_posts().await.is_ok());
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = MockPostSource::failing(404);
        let result = source.fetch_posts().await;
        assert!(matches!(result, Err(PostSourceError::Status(404))));
    }

    #[tokio::test]
    async fn test_gated_source_waits_for_release() {
        let source = MockPostSource::succeeding(vec![]).gated();
        let task = {
            let source = source.clone();
            tokio::spawn(async move { source.fetch_posts().await })
        };

        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        source.release();
        assert!(task.await.unwrap().is_ok());
    }
}
