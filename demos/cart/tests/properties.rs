//! Property tests for the cart reducer

#![allow(clippy::unwrap_used)]

use cart::{CartAction, CartEnvironment, CartReducer, CartState};
use proptest::prelude::*;
use statekit_core::reducer::Reducer;
use statekit_testing::helpers::reduce_all;
use std::collections::BTreeSet;

fn id_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn action_strategy() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        (id_strategy(), 0.01_f64..1000.0).prop_map(|(id, price)| CartAction::add(
            id.clone(),
            id,
            price
        )),
        id_strategy().prop_map(CartAction::remove),
        Just(CartAction::Unknown),
    ]
}

fn run(actions: Vec<CartAction>) -> CartState {
    let mut state = CartState::new();
    reduce_all(&CartReducer::new(), &mut state, actions, &CartEnvironment);
    state
}

proptest! {
    #[test]
    fn distinct_adds_yield_one_line_each(ids in prop::collection::btree_set(id_strategy(), 0..20)) {
        let actions = ids.iter().map(|id| CartAction::add(id.clone(), id.clone(), 1.0)).collect();
        let state = run(actions);

        prop_assert_eq!(state.items.len(), ids.len());
        prop_assert!(state.items.iter().all(|item| item.quantity == 1));
    }

    #[test]
    fn repeated_adds_accumulate_quantity(id in id_strategy(), n in 1_u32..50) {
        let state = run((0..n).map(|_| CartAction::add(id.clone(), "x", 1.0)).collect());

        prop_assert_eq!(state.items.len(), 1);
        prop_assert_eq!(state.items[0].quantity, n);
    }

    #[test]
    fn n_removals_delete_and_extra_removal_is_noop(id in id_strategy(), n in 1_u32..30) {
        let mut actions: Vec<_> = (0..n).map(|_| CartAction::add(id.clone(), "x", 1.0)).collect();
        actions.extend((0..n).map(|_| CartAction::remove(id.clone())));
        let state = run(actions);
        prop_assert!(state.items.is_empty());

        let mut after = state.clone();
        let _ = CartReducer.reduce(&mut after, CartAction::remove(id), &CartEnvironment);
        prop_assert_eq!(after, state);
    }

    #[test]
    fn invariants_hold_for_any_sequence(actions in prop::collection::vec(action_strategy(), 0..100)) {
        let state = run(actions);

        let ids: BTreeSet<_> = state.items.iter().map(|i| i.id.clone()).collect();
        prop_assert_eq!(ids.len(), state.items.len());
        prop_assert!(state.items.iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn unknown_action_is_identity(actions in prop::collection::vec(action_strategy(), 0..30)) {
        let state = run(actions);
        let mut after = state.clone();
        let _ = CartReducer.reduce(&mut after, CartAction::Unknown, &CartEnvironment);
        prop_assert_eq!(after, state);
    }
}
