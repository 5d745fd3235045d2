//! Property-based tests for the vending machine.
//!
//! These tests use proptest to drive machines through arbitrary
//! sequences of operations and winner draws.

use gumball::core::{State, VendingState};
use gumball::machine::{GumballMachine, ScriptedSpinner, WINNER_ODDS};
use gumball::StateSnapshot;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Action {
    InsertQuarter,
    EjectQuarter,
    TurnCrank,
    Refill(u32),
}

prop_compose! {
    fn arbitrary_action()(variant in 0..4u8, amount in 0..5u32) -> Action {
        match variant {
            0 => Action::InsertQuarter,
            1 => Action::EjectQuarter,
            2 => Action::TurnCrank,
            _ => Action::Refill(amount),
        }
    }
}

fn apply(machine: &mut GumballMachine, action: &Action) {
    match action {
        Action::InsertQuarter => machine.insert_quarter(),
        Action::EjectQuarter => machine.eject_quarter(),
        Action::TurnCrank => machine.turn_crank(),
        Action::Refill(amount) => machine.refill(*amount),
    };
}

proptest! {
    #[test]
    fn empty_machine_is_always_sold_out(
        initial in 0..6u32,
        draws in prop::collection::vec(0..WINNER_ODDS, 0..20),
        actions in prop::collection::vec(arbitrary_action(), 1..40)
    ) {
        let mut machine = GumballMachine::with_spinner("prop", initial, ScriptedSpinner::new(draws));
        prop_assert_eq!(machine.count() == 0, machine.state() == VendingState::SoldOut);

        for action in &actions {
            apply(&mut machine, action);
            prop_assert_eq!(
                machine.count() == 0,
                machine.state() == VendingState::SoldOut,
                "after {:?}: count {} state {:?}", action, machine.count(), machine.state()
            );
        }
    }

    #[test]
    fn machine_never_rests_mid_dispense(
        initial in 0..6u32,
        draws in prop::collection::vec(0..WINNER_ODDS, 0..20),
        actions in prop::collection::vec(arbitrary_action(), 1..40)
    ) {
        let mut machine = GumballMachine::with_spinner("prop", initial, ScriptedSpinner::new(draws));
        for action in &actions {
            apply(&mut machine, action);
            prop_assert!(!matches!(machine.state(), VendingState::Sold | VendingState::Winner));
        }
    }

    #[test]
    fn inventory_only_moves_by_release_or_refill(
        initial in 0..6u32,
        draws in prop::collection::vec(0..WINNER_ODDS, 0..20),
        actions in prop::collection::vec(arbitrary_action(), 1..40)
    ) {
        let mut machine = GumballMachine::with_spinner("prop", initial, ScriptedSpinner::new(draws));
        for action in &actions {
            let before = machine.count();
            apply(&mut machine, action);
            let after = machine.count();
            match action {
                Action::Refill(amount) => prop_assert_eq!(after, before + amount),
                Action::TurnCrank => prop_assert!(after <= before && before - after <= 2),
                _ => prop_assert_eq!(after, before),
            }
        }
    }

    #[test]
    fn reads_are_idempotent(
        initial in 0..6u32,
        actions in prop::collection::vec(arbitrary_action(), 0..20)
    ) {
        let mut machine = GumballMachine::with_spinner("prop", initial, ScriptedSpinner::never_win());
        for action in &actions {
            apply(&mut machine, action);
        }
        let first = (machine.count(), machine.location().to_string(), StateSnapshot::of(&machine.state()));
        let second = (machine.count(), machine.location().to_string(), StateSnapshot::of(&machine.state()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn history_ends_at_current_state(
        initial in 1..6u32,
        actions in prop::collection::vec(arbitrary_action(), 1..40)
    ) {
        let mut machine = GumballMachine::with_spinner("prop", initial, ScriptedSpinner::never_win());
        for action in &actions {
            apply(&mut machine, action);
        }
        if let Some(last) = machine.history().last() {
            prop_assert_eq!(last.to, machine.state());
        }
    }

    #[test]
    fn state_name_is_stable(variant in 0..5usize) {
        let state = VendingState::ALL[variant];
        prop_assert_eq!(state.name(), state.name());
        prop_assert_eq!(StateSnapshot::of(&state), StateSnapshot::of(&state));
    }
}

#[test]
fn winner_path_is_about_one_in_ten() {
    let cranks = 10_000u32;
    let mut machine = GumballMachine::new("stats", cranks * 2);
    let mut winners = 0u32;

    for _ in 0..cranks {
        machine.insert_quarter();
        let before = machine.count();
        machine.turn_crank();
        if before - machine.count() == 2 {
            winners += 1;
        }
    }

    assert!(
        (800..=1_200).contains(&winners),
        "winner path taken {winners} times out of {cranks}"
    );
}
