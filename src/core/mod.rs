//! Core state machine types.
//!
//! This module contains the pure data of the vending machine:
//! - State definitions via the `State` trait and the `VendingState` variants
//! - The operations that drive transitions
//! - Bounded history of the transitions taken

mod history;
mod operation;
mod state;

pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use operation::Operation;
pub use state::{State, VendingState};
