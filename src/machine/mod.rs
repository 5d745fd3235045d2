//! The vending machine: transition handlers and the service that runs them.
//!
//! - `GumballMachine` owns location, inventory, and the active state
//! - Handlers decide the next state; the machine only applies it
//! - `Spinner` decides whether a crank turn wins a second gumball

mod handlers;
mod hopper;
mod receipt;
mod service;
mod spinner;

pub use receipt::Receipt;
pub use service::{GumballMachine, SharedMachine};
pub use spinner::{RandomSpinner, ScriptedSpinner, Spinner, WINNER_ODDS, WINNING_DRAW};
