//! State transition history tracking.
//!
//! Every state change a machine makes is recorded here, so transitions can
//! be audited after the fact. The log is bounded: once it holds `limit`
//! entries the oldest entry is evicted for each new one.

use super::operation::Operation;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use gumball::core::{Operation, StateTransition, VendingState};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: VendingState::NoQuarter,
///     to: VendingState::HasQuarter,
///     trigger: Operation::InsertQuarter,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.trigger, Operation::InsertQuarter);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The operation that caused the change
    pub trigger: Operation,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of state transitions.
///
/// # Example
///
/// ```rust
/// use gumball::core::{Operation, StateHistory, StateTransition, VendingState};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: VendingState::NoQuarter,
///     to: VendingState::HasQuarter,
///     trigger: Operation::InsertQuarter,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: VendingState::HasQuarter,
///     to: VendingState::NoQuarter,
///     trigger: Operation::EjectQuarter,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // NoQuarter -> HasQuarter -> NoQuarter
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: usize,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history holding up to [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new empty history holding up to `limit` entries.
    ///
    /// A limit of zero is treated as one.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Append a transition, evicting the oldest entry when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.transitions.len() == self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the
    /// oldest retained transition, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Calculate total duration from first to last retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate over retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    /// Number of retained transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Maximum number of transitions retained.
    pub fn limit(&self) -> usize {
        self.limit
    }
}
