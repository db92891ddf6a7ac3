//! Dispatch gateway and read accessor for a cart.
//!
//! [`CartStore`] is the only way callers change a cart. It is constructed
//! explicitly and handed to whatever needs it; clones share one cart.

use crate::reducer::{CartEnvironment, CartReducer};
use crate::types::{CartAction, CartItem, CartState, ItemId};
use statekit_runtime::{Store, StoreError};
use thiserror::Error;

/// Errors surfaced by the cart gateway
#[derive(Error, Debug)]
pub enum CartError {
    /// A boundary payload could not be decoded into an action
    #[error("Invalid cart action: {0}")]
    Decode(#[from] serde_json::Error),

    /// The underlying store rejected the dispatch
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle to a shopping cart
#[derive(Clone)]
pub struct CartStore {
    store: Store<CartState, CartAction, CartEnvironment, CartReducer>,
}

impl CartStore {
    /// Creates a store holding an empty cart
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(CartState::new())
    }

    /// Creates a store starting from the given snapshot
    #[must_use]
    pub fn with_state(initial: CartState) -> Self {
        Self {
            store: Store::new(initial, CartReducer::new(), CartEnvironment),
        }
    }

    // ========== Dispatch ==========

    /// Adds one unit of an item
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn add_item(
        &self,
        id: impl Into<String>,
        title: impl Into<String>,
        price: f64,
    ) -> Result<(), StoreError> {
        self.dispatch(CartAction::add(id, title, price)).await
    }

    /// Removes one unit of an item
    ///
    /// Removing an id that is not in the cart leaves the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn remove_item(&self, id: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(CartAction::remove(id)).await
    }

    /// Dispatches an already-built action
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn dispatch(&self, action: CartAction) -> Result<(), StoreError> {
        self.store.send(action).await?;
        Ok(())
    }

    /// Decodes a JSON action and dispatches it
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Decode`] for malformed input and
    /// [`CartError::Store`] if the store rejects the dispatch.
    pub async fn dispatch_json(&self, json: &str) -> Result<(), CartError> {
        let action = CartAction::from_json(json)?;
        self.dispatch(action).await?;
        Ok(())
    }

    // ========== Read access ==========

    /// Owned copy of the current snapshot
    pub async fn snapshot(&self) -> CartState {
        self.store.snapshot().await
    }

    /// Current line items in insertion order
    pub async fn items(&self) -> Vec<CartItem> {
        self.store.state(|s| s.items.clone()).await
    }

    /// Current quantity of an item, zero if absent
    pub async fn quantity_of(&self, id: &str) -> u32 {
        let id = ItemId::from(id);
        self.store
            .state(|s| s.get(&id).map_or(0, |item| item.quantity))
            .await
    }

    /// Sum over items of `price × quantity`
    pub async fn total_price(&self) -> f64 {
        self.store.state(CartState::total_price).await
    }

    /// Total number of units in the cart
    pub async fn item_count(&self) -> u32 {
        self.store.state(CartState::item_count).await
    }

    /// Access to the underlying store, e.g. for shutdown
    #[must_use]
    pub const fn store(&self) -> &Store<CartState, CartAction, CartEnvironment, CartReducer> {
        &self.store
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
