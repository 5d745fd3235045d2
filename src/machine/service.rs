//! The gumball machine service.

use super::hopper::Hopper;
use super::receipt::Receipt;
use super::spinner::{RandomSpinner, Spinner};
use crate::config::MachineConfig;
use crate::core::{Operation, State, StateHistory, StateTransition, VendingState};
use chrono::Utc;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A machine shared between its local operator and its remote server.
///
/// Every operation runs under the lock, so a crank and its dispense are
/// never observed apart.
pub type SharedMachine = Arc<Mutex<GumballMachine>>;

/// A gumball machine: location, inventory, and the active state.
///
/// The machine has no state-specific logic of its own. Each operation is
/// forwarded to the active state's handler, which returns the next state.
pub struct GumballMachine {
    location: String,
    state: VendingState,
    hopper: Hopper,
    history: StateHistory<VendingState>,
}

impl GumballMachine {
    /// Create a machine stocked with `count` gumballs and an entropy-seeded spinner.
    pub fn new(location: impl Into<String>, count: u32) -> Self {
        Self::with_spinner(location, count, RandomSpinner::from_entropy())
    }

    /// Create a machine that draws winners from `spinner`.
    pub fn with_spinner(
        location: impl Into<String>,
        count: u32,
        spinner: impl Spinner + 'static,
    ) -> Self {
        let location = location.into();
        let state = VendingState::initial(count);
        debug!(
            target: "gumball::machine",
            location = %location,
            count,
            state = state.name(),
            "Machine created"
        );
        Self {
            hopper: Hopper::new(location.clone(), count, Box::new(spinner)),
            location,
            state,
            history: StateHistory::new(),
        }
    }

    /// Create a machine from configuration.
    pub fn from_config(config: &MachineConfig) -> Self {
        let spinner = match config.seed {
            Some(seed) => RandomSpinner::seeded(seed),
            None => RandomSpinner::from_entropy(),
        };
        let mut machine = Self::with_spinner(config.location.clone(), config.inventory, spinner);
        machine.history = StateHistory::with_limit(config.history_limit);
        machine
    }

    /// Wrap the machine for sharing with a remote server.
    pub fn into_shared(self) -> SharedMachine {
        Arc::new(Mutex::new(self))
    }

    /// Insert a quarter.
    pub fn insert_quarter(&mut self) -> Receipt {
        self.apply(Operation::InsertQuarter);
        self.hopper.take_receipt()
    }

    /// Ask for the quarter back.
    pub fn eject_quarter(&mut self) -> Receipt {
        self.apply(Operation::EjectQuarter);
        self.hopper.take_receipt()
    }

    /// Turn the crank and dispense in one step.
    pub fn turn_crank(&mut self) -> Receipt {
        self.apply(Operation::TurnCrank);
        self.apply(Operation::Dispense);
        self.hopper.take_receipt()
    }

    /// Add `count` gumballs. A non-empty machine always ends up waiting
    /// for a quarter, whatever state it was in.
    pub fn refill(&mut self, count: u32) -> Receipt {
        let total = self.hopper.add(count);
        self.hopper
            .say(format!("The gumball machine was just refilled; its new count is: {total}"));
        if total > 0 {
            self.transition_to(VendingState::NoQuarter, Operation::Refill);
        }
        self.hopper.take_receipt()
    }

    /// Gumballs left.
    pub fn count(&self) -> u32 {
        self.hopper.count()
    }

    /// Location the machine was built for.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Active state.
    pub fn state(&self) -> VendingState {
        self.state
    }

    /// Recorded transitions, oldest first.
    pub fn history(&self) -> &StateHistory<VendingState> {
        &self.history
    }

    fn apply(&mut self, operation: Operation) {
        let next = self.state.on(operation, &mut self.hopper);
        self.transition_to(next, operation);
    }

    fn transition_to(&mut self, next: VendingState, trigger: Operation) {
        if next == self.state {
            return;
        }
        debug!(
            target: "gumball::machine",
            location = %self.location,
            from = self.state.name(),
            to = next.name(),
            trigger = trigger.name(),
            "State transition"
        );
        self.history.record(StateTransition {
            from: self.state,
            to: next,
            trigger,
            timestamp: Utc::now(),
        });
        self.state = next;
    }
}

impl fmt::Debug for GumballMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GumballMachine")
            .field("location", &self.location)
            .field("count", &self.count())
            .field("state", &self.state)
            .finish()
    }
}

impl fmt::Display for GumballMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.count();
        writeln!(f, "Mighty Gumball, Inc.")?;
        writeln!(f, "Rust-enabled Standing Gumball Model #2014")?;
        writeln!(
            f,
            "Inventory: {count} gumball{}",
            if count == 1 { "" } else { "s" }
        )?;
        writeln!(f, "Machine is {}", self.state)
    }
}
