//! Core State trait and the vending machine's state variants.
//!
//! States carry no data of their own. They are pure tags: all behavior
//! lives in the transition handlers, and all mutable data lives in the
//! machine that owns the active state.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position in a state machine.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for audit export
///
/// # Example
///
/// ```rust
/// use gumball::core::{State, VendingState};
///
/// assert_eq!(VendingState::HasQuarter.name(), "HasQuarter");
/// assert_eq!(VendingState::HasQuarter.tag(), "waiting for turn of crank");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for logging and snapshots.
    fn name(&self) -> &str;

    /// Human-readable description shown to observers.
    ///
    /// Defaults to the state's name.
    fn tag(&self) -> &str {
        self.name()
    }

    /// Check if the state accepts no customer interaction until an
    /// operator intervenes.
    ///
    /// Default implementation returns `false`.
    fn is_blocked(&self) -> bool {
        false
    }
}

/// The five mutually exclusive behavioral modes of a gumball machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum VendingState {
    NoQuarter,
    HasQuarter,
    Sold,
    Winner,
    SoldOut,
}

impl VendingState {
    /// Every variant, in declaration order.
    pub const ALL: [VendingState; 5] = [
        Self::NoQuarter,
        Self::HasQuarter,
        Self::Sold,
        Self::Winner,
        Self::SoldOut,
    ];

    /// State a machine starts in when stocked with `inventory` gumballs.
    pub fn initial(inventory: u32) -> Self {
        if inventory > 0 {
            Self::NoQuarter
        } else {
            Self::SoldOut
        }
    }
}

impl State for VendingState {
    fn name(&self) -> &str {
        match self {
            Self::NoQuarter => "NoQuarter",
            Self::HasQuarter => "HasQuarter",
            Self::Sold => "Sold",
            Self::Winner => "Winner",
            Self::SoldOut => "SoldOut",
        }
    }

    fn tag(&self) -> &str {
        match self {
            Self::NoQuarter => "waiting for quarter",
            Self::HasQuarter => "waiting for turn of crank",
            Self::Sold => "dispensing a gumball",
            Self::Winner => "despensing two gumballs for your quarter, because YOU'RE A WINNER!",
            Self::SoldOut => "sold out",
        }
    }

    fn is_blocked(&self) -> bool {
        matches!(self, Self::SoldOut)
    }
}

impl fmt::Display for VendingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
