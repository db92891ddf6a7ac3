//! Reducer logic for loading posts.
//!
//! `Load` never performs the request itself. It marks the state as loading and
//! returns one `Effect::Future` that calls the injected source and feeds back
//! either `Loaded` or `Failed`.

use crate::environment::{PostSource, PostsEnvironment};
use crate::types::{LoadStatus, PostsAction, PostsState};
use statekit_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Reducer for the posts feature, generic over the post source
pub struct PostsReducer<P> {
    _source: PhantomData<fn() -> P>,
}

impl<P> PostsReducer<P> {
    /// Creates a new `PostsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _source: PhantomData,
        }
    }
}

impl<P> Default for PostsReducer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PostSource> Reducer for PostsReducer<P> {
    type State = PostsState;
    type Action = PostsAction;
    type Environment = PostsEnvironment<P>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PostsAction::Load => {
                if state.status.is_loading() {
                    tracing::debug!("Load ignored: request already in flight");
                    return smallvec![Effect::None];
                }

                state.status = LoadStatus::Loading;

                let source = Arc::clone(&env.source);
                smallvec![Effect::future(async move {
                    match source.fetch_posts().await {
                        Ok(posts) => Some(PostsAction::Loaded { posts }),
                        Err(error) => {
                            tracing::warn!(%error, "Loading posts failed");
                            Some(PostsAction::Failed {
                                message: error.to_string(),
                            })
                        },
                    }
                })]
            },
            PostsAction::Loaded { posts } => {
                tracing::debug!(count = posts.len(), "Posts loaded");
                state.status = LoadStatus::Loaded {
                    data: posts,
                    fetched_at: env.clock.now(),
                };
                smallvec![Effect::None]
            },
            PostsAction::Failed { message } => {
                state.status = LoadStatus::Failed(message);
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::mocks::MockPostSource;
    use crate::types::BlogPost;
    use statekit_core::environment::Clock;
    use statekit_testing::{ReducerTest, assertions, test_clock};

    type PostsTest = ReducerTest<
        PostsReducer<MockPostSource>,
        PostsState,
        PostsAction,
        PostsEnvironment<MockPostSource>,
    >;

    fn env(source: MockPostSource) -> PostsEnvironment<MockPostSource> {
        PostsEnvironment::new(source, Arc::new(test_clock()))
    }

    fn posts_test(source: MockPostSource) -> PostsTest {
        ReducerTest::new(PostsReducer::new()).with_env(env(source))
    }

    fn post(id: u64) -> BlogPost {
        BlogPost {
            id,
            title: format!("Post {id}"),
            text: "...".to_string(),
        }
    }

    #[test]
    fn test_load_marks_loading_and_returns_future() {
        posts_test(MockPostSource::succeeding(vec![post(1)]))
            .given_state(PostsState::default())
            .when_action(PostsAction::Load)
            .then_state(|state| assert_eq!(state.status, LoadStatus::Loading))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_load_while_loading_is_ignored() {
        posts_test(MockPostSource::succeeding(vec![]))
            .given_state(PostsState {
                status: LoadStatus::Loading,
            })
            .when_action(PostsAction::Load)
            .then_state_unchanged()
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_load_after_failure_tries_again() {
        posts_test(MockPostSource::succeeding(vec![]))
            .given_state(PostsState {
                status: LoadStatus::Failed("offline".to_string()),
            })
            .when_action(PostsAction::Load)
            .then_state(|state| assert!(state.status.is_loading()))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_loaded_stores_posts_with_clock_time() {
        posts_test(MockPostSource::succeeding(vec![]))
            .given_state(PostsState {
                status: LoadStatus::Loading,
            })
            .when_action(PostsAction::Loaded {
                posts: vec![post(1), post(2)],
            })
            .then_state(|state| {
                assert_eq!(
                    state.status,
                    LoadStatus::Loaded {
                        data: vec![post(1), post(2)],
                        fetched_at: test_clock().now(),
                    }
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_failed_stores_message() {
        posts_test(MockPostSource::succeeding(vec![]))
            .given_state(PostsState {
                status: LoadStatus::Loading,
            })
            .when_action(PostsAction::Failed {
                message: "Failed to fetch posts: timed out".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.status.error(), Some("Failed to fetch posts: timed out"));
            })
            .run();
    }

    #[tokio::test]
    async fn test_effect_feeds_back_loaded() {
        let source = MockPostSource::succeeding(vec![post(3)]);
        let env = env(source.clone());
        let mut state = PostsState::default();

        let mut effects = PostsReducer::new().reduce(&mut state, PostsAction::Load, &env);
        let Some(Effect::Future(fut)) = effects.pop() else {
            panic!("expected a future effect");
        };

        assert_eq!(fut.await, Some(PostsAction::Loaded { posts: vec![post(3)] }));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_effect_feeds_back_failed() {
        let env = env(MockPostSource::failing(500));
        let mut state = PostsState::default();

        let mut effects = PostsReducer::new().reduce(&mut state, PostsAction::Load, &env);
        let Some(Effect::Future(fut)) = effects.pop() else {
            panic!("expected a future effect");
        };

        assert_eq!(
            fut.await,
            Some(PostsAction::Failed {
                message: "Failed to fetch posts: server responded with status 500".to_string(),
            })
        );
    }
}
