//! Operations that drive the vending machine between states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation applied to a machine.
///
/// The first four are dispatched to the active state's handler. `Refill`
/// is handled by the machine itself and only appears as a history trigger.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Operation {
    InsertQuarter,
    EjectQuarter,
    TurnCrank,
    Dispense,
    Refill,
}

impl Operation {
    /// Name used in logs and history.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertQuarter => "insert_quarter",
            Self::EjectQuarter => "eject_quarter",
            Self::TurnCrank => "turn_crank",
            Self::Dispense => "dispense",
            Self::Refill => "refill",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
