//! Winner draws for the crank handler.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Draws are uniform over `[0, WINNER_ODDS)`.
pub const WINNER_ODDS: u32 = 10;

/// The draw that selects the winner path.
pub const WINNING_DRAW: u32 = 0;

/// Source of winner draws.
pub trait Spinner: Send {
    /// Draw a value in `[0, WINNER_ODDS)`.
    fn spin(&mut self) -> u32;

    /// Draw and report whether the crank turn is a winner.
    fn is_winner(&mut self) -> bool {
        self.spin() == WINNING_DRAW
    }
}

/// Uniform spinner backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomSpinner {
    rng: StdRng,
}

impl RandomSpinner {
    /// Reproducible draws from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy. Runs are not reproducible.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomSpinner {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Spinner for RandomSpinner {
    fn spin(&mut self) -> u32 {
        self.rng.gen_range(0..WINNER_ODDS)
    }
}

/// Spinner that replays a fixed sequence of draws.
///
/// Once the script is exhausted every draw returns the fallback, a loser
/// unless built with [`ScriptedSpinner::always_win`]. Draws outside
/// `[0, WINNER_ODDS)` are reduced modulo the odds.
///
/// ```rust
/// use gumball::machine::{ScriptedSpinner, Spinner};
///
/// let mut spinner = ScriptedSpinner::new([0, 7]);
/// assert!(spinner.is_winner());
/// assert!(!spinner.is_winner());
/// assert!(!spinner.is_winner());
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSpinner {
    draws: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedSpinner {
    /// Replay `draws` in order, then lose.
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: WINNER_ODDS - 1,
        }
    }

    /// Every crank wins.
    pub fn always_win() -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: WINNING_DRAW,
        }
    }

    /// Every crank loses.
    pub fn never_win() -> Self {
        Self::new(std::iter::empty())
    }

    /// Scripted draws not yet used.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl Spinner for ScriptedSpinner {
    fn spin(&mut self) -> u32 {
        self.draws
            .pop_front()
            .map(|draw| draw % WINNER_ODDS)
            .unwrap_or(self.fallback)
    }
}
