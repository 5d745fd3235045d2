//! The transition table.
//!
//! One handler per operation, each a `match` over the active state that
//! returns the next state. Handlers talk to inventory only through the
//! [`Hopper`]; the machine applies whatever state they return.

use super::hopper::Hopper;
use crate::core::{Operation, VendingState};

impl VendingState {
    /// Dispatch `operation` to this state's handler.
    ///
    /// `Refill` is not a state operation and leaves the state unchanged.
    pub(crate) fn on(self, operation: Operation, hopper: &mut Hopper) -> VendingState {
        match operation {
            Operation::InsertQuarter => self.insert_quarter(hopper),
            Operation::EjectQuarter => self.eject_quarter(hopper),
            Operation::TurnCrank => self.turn_crank(hopper),
            Operation::Dispense => self.dispense(hopper),
            Operation::Refill => self,
        }
    }

    fn insert_quarter(self, hopper: &mut Hopper) -> VendingState {
        match self {
            Self::NoQuarter => {
                hopper.say("You inserted a quarter");
                Self::HasQuarter
            }
            Self::HasQuarter => {
                hopper.say("You can't insert another quarter");
                self
            }
            Self::Sold => {
                hopper.say("Please wait, we're already giving you a gumball");
                self
            }
            Self::Winner => {
                hopper.say("Please wait, we're already giving you a Gumball");
                self
            }
            Self::SoldOut => {
                hopper.say("You can't insert a quarter, the machine is sold out");
                self
            }
        }
    }

    fn eject_quarter(self, hopper: &mut Hopper) -> VendingState {
        match self {
            Self::NoQuarter => {
                hopper.say("You haven't inserted a quarter, nothing to eject");
                self
            }
            Self::HasQuarter => {
                hopper.say("Quarter returned");
                Self::NoQuarter
            }
            Self::Sold => {
                hopper.say("Sorry, you already turned the crank");
                self
            }
            Self::Winner => {
                hopper.say("Please wait, we're already giving you a Gumball");
                self
            }
            Self::SoldOut => {
                hopper.say("You can't eject, you haven't inserted a quarter yet");
                self
            }
        }
    }

    fn turn_crank(self, hopper: &mut Hopper) -> VendingState {
        match self {
            Self::NoQuarter => {
                hopper.say("You turned, but there's no quarter");
                self
            }
            Self::HasQuarter => {
                hopper.say("You turned...");
                if hopper.is_winner() {
                    Self::Winner
                } else {
                    Self::Sold
                }
            }
            Self::Sold => {
                hopper.say("Turning twice doesn't get you another gumball!");
                self
            }
            Self::Winner => {
                hopper.say("Turning again doesn't get you another gumball!");
                self
            }
            Self::SoldOut => {
                hopper.say("You turned, but there are no gumballs");
                self
            }
        }
    }

    fn dispense(self, hopper: &mut Hopper) -> VendingState {
        match self {
            Self::NoQuarter => {
                hopper.say("You need to pay first");
                self
            }
            Self::HasQuarter | Self::SoldOut => {
                hopper.say("No gumball dispensed");
                self
            }
            Self::Sold => {
                hopper.release_ball();
                after_release(hopper)
            }
            Self::Winner => {
                hopper.say("YOU'RE A WINNER! You get two gumballs for your quarter");
                hopper.release_ball();
                if hopper.is_empty() {
                    // Empty after the first gumball: no second release.
                    hopper.say("Oops, out of gumballs!");
                    return Self::SoldOut;
                }
                hopper.release_ball();
                after_release(hopper)
            }
        }
    }
}

fn after_release(hopper: &mut Hopper) -> VendingState {
    if hopper.is_empty() {
        hopper.say("Oops, out of gumballs!");
        VendingState::SoldOut
    } else {
        VendingState::NoQuarter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::spinner::ScriptedSpinner;

    fn hopper(count: u32, spinner: ScriptedSpinner) -> Hopper {
        Hopper::new("test".into(), count, Box::new(spinner))
    }

    #[test]
    fn no_quarter_accepts_a_quarter() {
        let mut hopper = hopper(5, ScriptedSpinner::never_win());
        let next = VendingState::NoQuarter.on(Operation::InsertQuarter, &mut hopper);
        assert_eq!(next, VendingState::HasQuarter);
        assert!(hopper.take_receipt().contains("You inserted a quarter"));
    }

    #[test]
    fn no_quarter_ignores_everything_else() {
        for (operation, text) in [
            (Operation::EjectQuarter, "nothing to eject"),
            (Operation::TurnCrank, "there's no quarter"),
            (Operation::Dispense, "pay first"),
        ] {
            let mut hopper = hopper(5, ScriptedSpinner::never_win());
            let next = VendingState::NoQuarter.on(operation, &mut hopper);
            assert_eq!(next, VendingState::NoQuarter);
            assert!(hopper.take_receipt().contains(text), "{operation}");
        }
    }

    #[test]
    fn has_quarter_returns_quarter() {
        let mut hopper = hopper(5, ScriptedSpinner::never_win());
        let next = VendingState::HasQuarter.on(Operation::EjectQuarter, &mut hopper);
        assert_eq!(next, VendingState::NoQuarter);
        assert!(hopper.take_receipt().contains("quarter returned"));
    }

    #[test]
    fn has_quarter_rejects_second_quarter() {
        let mut hopper = hopper(5, ScriptedSpinner::never_win());
        let next = VendingState::HasQuarter.on(Operation::InsertQuarter, &mut hopper);
        assert_eq!(next, VendingState::HasQuarter);
        assert!(hopper.take_receipt().contains("another quarter"));
    }

    #[test]
    fn crank_draws_winner_or_sold() {
        let mut hopper = hopper(5, ScriptedSpinner::new([0, 4]));
        assert_eq!(
            VendingState::HasQuarter.on(Operation::TurnCrank, &mut hopper),
            VendingState::Winner
        );
        assert_eq!(
            VendingState::HasQuarter.on(Operation::TurnCrank, &mut hopper),
            VendingState::Sold
        );
    }

    #[test]
    fn has_quarter_dispense_is_a_no_op() {
        let mut hopper = hopper(5, ScriptedSpinner::never_win());
        let next = VendingState::HasQuarter.on(Operation::Dispense, &mut hopper);
        assert_eq!(next, VendingState::HasQuarter);
        assert_eq!(hopper.count(), 5);
    }

    #[test]
    fn sold_dispenses_one() {
        let mut hopper = hopper(3, ScriptedSpinner::never_win());
        let next = VendingState::Sold.on(Operation::Dispense, &mut hopper);
        assert_eq!(next, VendingState::NoQuarter);
        assert_eq!(hopper.count(), 2);
    }

    #[test]
    fn sold_last_gumball_sells_out() {
        let mut hopper = hopper(1, ScriptedSpinner::never_win());
        let next = VendingState::Sold.on(Operation::Dispense, &mut hopper);
        assert_eq!(next, VendingState::SoldOut);
        assert_eq!(hopper.count(), 0);
        assert!(hopper.take_receipt().contains("out of gumballs"));
    }

    #[test]
    fn sold_dispense_with_empty_hopper_clamps() {
        let mut hopper = hopper(0, ScriptedSpinner::never_win());
        let next = VendingState::Sold.on(Operation::Dispense, &mut hopper);
        assert_eq!(next, VendingState::SoldOut);
        assert_eq!(hopper.count(), 0);
        assert!(hopper.take_receipt().contains("no gumball left"));
    }

    #[test]
    fn winner_dispenses_two() {
        let mut hopper = hopper(10, ScriptedSpinner::never_win());
        let next = VendingState::Winner.on(Operation::Dispense, &mut hopper);
        assert_eq!(next, VendingState::NoQuarter);
        assert_eq!(hopper.count(), 8);
        let receipt = hopper.take_receipt();
        assert!(receipt.contains("winner"));
        let released = receipt
            .lines()
            .iter()
            .filter(|l| l.contains("rolling out"))
            .count();
        assert_eq!(released, 2);
    }

    #[test]
    fn winner_with_two_left_sells_out() {
        let mut hopper = hopper(2, ScriptedSpinner::never_win());
        let next = VendingState::Winner.on(Operation::Dispense, &mut hopper);
        assert_eq!(next, VendingState::SoldOut);
        assert_eq!(hopper.count(), 0);
    }

    #[test]
    fn winner_with_one_left_skips_second_release() {
        let mut hopper = hopper(1, ScriptedSpinner::never_win());
        let next = VendingState::Winner.on(Operation::Dispense, &mut hopper);
        assert_eq!(next, VendingState::SoldOut);
        assert_eq!(hopper.count(), 0);
        let receipt = hopper.take_receipt();
        let released = receipt
            .lines()
            .iter()
            .filter(|l| l.contains("rolling out"))
            .count();
        assert_eq!(released, 1);
        assert!(!receipt.contains("no gumball left"));
    }

    #[test]
    fn sold_out_ignores_everything() {
        for operation in [
            Operation::InsertQuarter,
            Operation::EjectQuarter,
            Operation::TurnCrank,
            Operation::Dispense,
        ] {
            let mut hopper = hopper(0, ScriptedSpinner::always_win());
            let next = VendingState::SoldOut.on(operation, &mut hopper);
            assert_eq!(next, VendingState::SoldOut);
        }
    }

    #[test]
    fn dispensing_states_ignore_customer_input() {
        for state in [VendingState::Sold, VendingState::Winner] {
            for operation in [
                Operation::InsertQuarter,
                Operation::EjectQuarter,
                Operation::TurnCrank,
            ] {
                let mut hopper = hopper(4, ScriptedSpinner::never_win());
                assert_eq!(state.on(operation, &mut hopper), state);
                assert_eq!(hopper.count(), 4);
            }
        }
    }
}
