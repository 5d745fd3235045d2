//! Values that cross the call boundary.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A read-only copy of a machine's state, as seen by a remote caller.
///
/// Built fresh on every read. It owns its text and holds nothing that
/// points back at the machine it was taken from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Variant name, e.g. `HasQuarter`
    pub name: String,
    /// Display tag, e.g. `waiting for turn of crank`
    pub tag: String,
}

impl StateSnapshot {
    /// Copy the name and tag of `state`.
    pub fn of<S: State>(state: &S) -> Self {
        Self {
            name: state.name().to_string(),
            tag: state.tag().to_string(),
        }
    }

    /// Whether this snapshot was taken from `state`.
    pub fn is<S: State>(&self, state: &S) -> bool {
        self.name == state.name()
    }
}

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
