//! Domain types for loading blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as returned by the remote source
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Post identifier
    pub id: u64,
    /// Headline
    pub title: String,
    /// Post text
    #[serde(alias = "body")]
    pub text: String,
}

/// Where a single remote load currently stands
///
/// A load starts `Idle`, moves to `Loading` when requested and always ends in
/// exactly one of `Failed` or `Loaded`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus<T> {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The request failed; the message is meant for display
    Failed(String),
    /// The request succeeded
    Loaded {
        /// The loaded value
        data: T,
        /// When the value arrived
        fetched_at: DateTime<Utc>,
    },
}

impl<T> LoadStatus<T> {
    /// Whether a request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The failure message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for LoadStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Posts snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsState {
    /// Status of the most recent load
    pub status: LoadStatus<Vec<BlogPost>>,
}

/// Posts actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostsAction {
    /// Request a load from the source
    Load,
    /// The source returned posts
    Loaded {
        /// Posts in source order
        posts: Vec<BlogPost>,
    },
    /// The source failed
    Failed {
        /// Display message
        message: String,
    },
}

impl PostsAction {
    /// Whether this action ends a load
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_decode_source_payload() {
        let json = r#"[{"userId":1,"id":7,"title":"Hello","body":"World"}]"#;
        let posts: Vec<BlogPost> = serde_json::from_str(json).unwrap();
        assert_eq!(
            posts,
            vec![BlogPost {
                id: 7,
                title: "Hello".to_string(),
                text: "World".to_string(),
            }]
        );
    }

    #[test]
    fn test_status_accessors() {
        let idle = LoadStatus::<u8>::default();
        assert_eq!(idle, LoadStatus::Idle);
        assert!(!idle.is_loading());
        assert!(idle.data().is_none());

        let failed = LoadStatus::<u8>::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));

        let loaded = LoadStatus::Loaded {
            data: 3_u8,
            fetched_at: Utc::now(),
        };
        assert_eq!(loaded.data(), Some(&3));
        assert!(loaded.error().is_none());
    }

    #[test]
    fn test_terminal_actions() {
        assert!(!PostsAction::Load.is_terminal());
        assert!(PostsAction::Loaded { posts: vec![] }.is_terminal());
        assert!(
            PostsAction::Failed {
                message: String::new()
            }
            .is_terminal()
        );
    }
}
