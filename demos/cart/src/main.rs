//! Cart demo binary
//!
//! Drives a cart through a few dispatches and prints the snapshot after each.

use cart::CartStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn print_cart(cart: &CartStore) {
    let items = cart.items().await;
    if items.is_empty() {
        println!("  (empty)");
    }
    for item in &items {
        println!(
            "  {:<8} {:<12} {:>3} x {:>7.2} = {:>8.2}",
            item.id,
            item.title,
            item.quantity,
            item.price,
            item.subtotal()
        );
    }
    println!("  total: {:.2}", cart.total_price().await);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cart=debug,statekit_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Cart ===\n");

    let cart = CartStore::new();

    println!(">>> AddItem(a, Widget, 9.99) x2");
    cart.add_item("a", "Widget", 9.99).await?;
    cart.add_item("a", "Widget", 9.99).await?;
    print_cart(&cart).await;

    println!("\n>>> AddItem(b, Gadget, 24.50)");
    cart.add_item("b", "Gadget", 24.50).await?;
    print_cart(&cart).await;

    println!("\n>>> RemoveItem(a)");
    cart.remove_item("a").await?;
    print_cart(&cart).await;

    println!("\n>>> RemoveItem(b)");
    cart.remove_item("b").await?;
    print_cart(&cart).await;

    println!("\n>>> RemoveItem(missing)");
    cart.remove_item("missing").await?;
    print_cart(&cart).await;

    println!("\n>>> JSON {{\"type\":\"CHECKOUT\"}}");
    cart.dispatch_json(r#"{"type":"CHECKOUT"}"#).await?;
    print_cart(&cart).await;

    cart.store().shutdown_default().await?;
    Ok(())
}
