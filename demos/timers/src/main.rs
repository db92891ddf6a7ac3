//! Timers demo binary

use timers::TimersStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn print_board(board: &TimersStore) {
    let state = board.snapshot().await;
    println!(
        "  running: {}  timers: {}  total: {}s",
        state.is_running,
        state.timers.len(),
        state.total_duration()
    );
    for timer in &state.timers {
        println!("    - {:<12} {:>5}s", timer.name, timer.duration);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timers=debug,statekit_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Timers ===\n");

    let board = TimersStore::new();
    print_board(&board).await;

    println!("\n>>> Stop");
    board.stop().await?;
    print_board(&board).await;

    println!("\n>>> AddTimer(t1, 60), AddTimer(tea, 180)");
    board.add_timer("t1", 60).await?;
    board.add_timer("tea", 180).await?;
    print_board(&board).await;

    println!("\n>>> Start");
    board.start().await?;
    print_board(&board).await;

    println!("\n>>> JSON {{\"type\":\"ADD_TIMER\",\"name\":\"nap\",\"duration\":1200}}");
    board
        .dispatch_json(r#"{"type":"ADD_TIMER","name":"nap","duration":1200}"#)
        .await?;
    print_board(&board).await;

    board.store().shutdown_default().await?;
    Ok(())
}
