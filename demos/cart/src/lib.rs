//! # Cart
//!
//! A shopping cart as a pure state machine.
//!
//! - Adding an id already in the cart bumps its quantity
//! - Removing the last unit of an id deletes its line
//! - Removing an id that is not in the cart does nothing
//! - Unknown actions do nothing
//!
//! ## Example
//!
//! ```no_run
//! use cart::CartStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cart = CartStore::new();
//! cart.add_item("a", "Widget", 9.99).await?;
//! cart.add_item("a", "Widget", 9.99).await?;
//! cart.remove_item("a").await?;
//!
//! assert_eq!(cart.quantity_of("a").await, 1);
//! println!("Total: {:.2}", cart.total_price().await);
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use reducer::{CartEnvironment, CartReducer};
pub use store::{CartError, CartStore};
pub use types::{CartAction, CartItem, CartState, ItemId};
