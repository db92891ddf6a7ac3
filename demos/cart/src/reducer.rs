//! Reducer logic for the shopping cart.

use crate::types::{CartAction, CartItem, CartState, ItemId};
use statekit_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Environment for the cart reducer
///
/// Cart transitions need no injected dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartEnvironment;

/// Reducer for the shopping cart
#[derive(Debug, Clone, Copy, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add_item(state: &mut CartState, id: ItemId, title: String, price: f64) {
        if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            state.items.push(CartItem::new(id, title, price));
        }
    }

    /// Removing an id that is not in the cart is a no-op.
    fn remove_item(state: &mut CartState, id: &ItemId) {
        let Some(index) = state.position(id) else {
            tracing::debug!(%id, "Ignoring removal of item not in cart");
            return;
        };

        if state.items[index].quantity <= 1 {
            state.items.remove(index);
        } else {
            state.items[index].quantity -= 1;
        }
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddItem { id, title, price } => Self::add_item(state, id, title, price),
            CartAction::RemoveItem { id } => Self::remove_item(state, &id),
            CartAction::Unknown => {
                tracing::trace!("Ignoring unknown cart action");
            },
        }

        // Pure state machine - no side effects
        smallvec![Effect::None]
    }
}
