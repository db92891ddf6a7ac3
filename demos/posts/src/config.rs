//! Configuration for the posts demo.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Default endpoint serving a JSON array of posts
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Posts demo configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsConfig {
    /// Endpoint to GET posts from
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Render Prometheus metrics after the demo run
    pub print_metrics: bool,
}

impl PostsConfig {
    /// Load configuration from environment variables
    ///
    /// - `POSTS_URL` (default: [`DEFAULT_POSTS_URL`])
    /// - `POSTS_TIMEOUT_SECS` (default: 10)
    /// - `POSTS_PRINT_METRICS` (default: false)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; missing or unparsable values
    /// fall back to the defaults
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup("POSTS_URL").unwrap_or_else(|| DEFAULT_POSTS_URL.to_string()),
            timeout_secs: lookup("POSTS_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            print_metrics: lookup("POSTS_PRINT_METRICS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_POSTS_URL.to_string(),
            timeout_secs: 10,
            print_metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_endpoint() {
        let config = PostsConfig::default();
        assert_eq!(config.url, DEFAULT_POSTS_URL);
        assert_eq!(config.timeout_secs, 10);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = PostsConfig::from_lookup(|key| match key {
            "POSTS_URL" => Some("http://localhost:8080/posts".to_string()),
            "POSTS_TIMEOUT_SECS" => Some("3".to_string()),
            "POSTS_PRINT_METRICS" => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(config.url, "http://localhost:8080/posts");
        assert_eq!(config.timeout_secs, 3);
        assert!(config.print_metrics);
    }

    #[test]
    fn test_unparsable_values_fall_back_to_defaults() {
        let config = PostsConfig::from_lookup(|key| match key {
            "POSTS_TIMEOUT_SECS" => Some("soon".to_string()),
            "POSTS_PRINT_METRICS" => Some("yes please".to_string()),
            _ => None,
        });
        assert_eq!(config, PostsConfig::default());
    }
}
