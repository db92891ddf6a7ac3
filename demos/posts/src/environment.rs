//! Injected dependencies for loading posts.
//!
//! The reducer only knows the [`PostSource`] trait. Production wires in
//! [`HttpPostSource`]; tests use [`crate::mocks::MockPostSource`].

use crate::config::PostsConfig;
use crate::types::BlogPost;
use statekit_core::environment::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors a post source can report
#[derive(Error, Debug)]
pub enum PostSourceError {
    /// Transport or decoding failure
    #[error("Failed to fetch posts: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Failed to fetch posts: server responded with status {0}")]
    Status(u16),
}

/// Something that can produce the current list of posts
pub trait PostSource: Send + Sync + 'static {
    /// Fetch posts once. No retries.
    fn fetch_posts(&self) -> impl Future<Output = Result<Vec<BlogPost>, PostSourceError>> + Send;
}

/// Post source backed by a JSON HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpPostSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPostSource {
    /// Build a source for the configured URL and timeout
    ///
    /// # Errors
    ///
    /// Returns [`PostSourceError::Request`] if the HTTP client cannot be built.
    pub fn from_config(config: &PostsConfig) -> Result<Self, PostSourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Endpoint this source reads from
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PostSource for HttpPostSource {
    async fn fetch_posts(&self) -> Result<Vec<BlogPost>, PostSourceError> {
        tracing::debug!(url = %self.url, "Fetching posts");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Post source returned an error status");
            return Err(PostSourceError::Status(status.as_u16()));
        }

        let posts = response.json::<Vec<BlogPost>>().await?;
        tracing::debug!(count = posts.len(), "Fetched posts");
        Ok(posts)
    }
}

/// Environment for the posts reducer
pub struct PostsEnvironment<P: PostSource> {
    /// Where posts come from
    pub source: Arc<P>,
    /// Stamps successful loads
    pub clock: Arc<dyn Clock>,
}

impl<P: PostSource> PostsEnvironment<P> {
    /// Creates a new environment
    #[must_use]
    pub fn new(source: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            source: Arc::new(source),
            clock,
        }
    }
}

impl<P: PostSource> Clone for PostsEnvironment<P> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = PostSourceError::Status(503);
        assert_eq!(
            err.to_string(),
            "Failed to fetch posts: server responded with status 503"
        );
    }

    #[test]
    fn test_http_source_from_config() {
        let config = PostsConfig {
            url: "http://127.0.0.1:9/posts".to_string(),
            timeout_secs: 1,
            print_metrics: false,
        };
        let source = HttpPostSource::from_config(&config).unwrap();
        assert_eq!(source.url(), "http://127.0.0.1:9/posts");
    }

    #[tokio::test]
    async fn test_http_source_unreachable_is_request_error() {
        // Port 9 (discard) is not expected to serve HTTP locally
        let config = PostsConfig {
            url: "http://127.0.0.1:9/posts".to_string(),
            timeout_secs: 1,
            print_metrics: false,
        };
        let source = HttpPostSource::from_config(&config).unwrap();
        let result = source.fetch_posts().await;
        assert!(matches!(result, Err(PostSourceError::Request(_))));
    }
}
