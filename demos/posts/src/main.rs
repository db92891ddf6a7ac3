//! Posts demo binary
//!
//! Loads posts over HTTP once and prints the outcome. Configure with
//! `POSTS_URL`, `POSTS_TIMEOUT_SECS`, `POSTS_PRINT_METRICS` and `RUST_LOG`.

use posts::{HttpPostSource, LoadStatus, PostsAction, PostsConfig, PostsStore};
use statekit_runtime::metrics::PrometheusRecorder;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posts=debug,statekit_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PostsConfig::from_env();
    tracing::info!(url = %config.url, timeout_secs = config.timeout_secs, "Starting posts demo");

    let mut recorder = PrometheusRecorder::new();
    if config.print_metrics {
        recorder.install()?;
    }

    println!("=== Posts ===\n");

    let posts = PostsStore::new(HttpPostSource::from_config(&config)?);

    println!(">>> Load from {}", config.url);
    let mut handle = posts.store().send(PostsAction::Load).await?;
    if posts.is_loading().await {
        println!("  loading...");
    }

    // One extra second over the request timeout so the effect always settles first
    let settle = Duration::from_secs(config.timeout_secs.saturating_add(1));
    if handle.wait_with_timeout(settle).await.is_err() {
        tracing::warn!("Load did not settle in time");
    }

    match posts.status().await {
        LoadStatus::Loaded { data, fetched_at } => {
            println!("  loaded {} posts at {fetched_at}", data.len());
            for post in data.iter().take(5) {
                println!("    #{:<4} {}", post.id, post.title);
            }
            if data.len() > 5 {
                println!("    ... and {} more", data.len() - 5);
            }
        },
        LoadStatus::Failed(message) => println!("  error: {message}"),
        LoadStatus::Loading => println!("  still loading"),
        LoadStatus::Idle => println!("  idle"),
    }

    if let Some(text) = recorder.render() {
        println!("\n=== Metrics ===\n{text}");
    }

    posts.store().shutdown_default().await?;
    Ok(())
}
