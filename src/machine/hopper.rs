//! Inventory context handed to state handlers.
//!
//! Handlers reach the machine only through a `Hopper`: they can read the
//! count, release one gumball at a time, draw a winner, and emit status
//! lines. They cannot touch the active state; they return the next one.

use super::receipt::Receipt;
use super::spinner::Spinner;
use tracing::{info, warn};

pub(crate) struct Hopper {
    count: u32,
    spinner: Box<dyn Spinner>,
    location: String,
    lines: Vec<String>,
}

impl Hopper {
    pub(crate) fn new(location: String, count: u32, spinner: Box<dyn Spinner>) -> Self {
        Self {
            count,
            spinner,
            location,
            lines: Vec::new(),
        }
    }

    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Emit a status line.
    pub(crate) fn say(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!(
            target: "gumball::machine",
            location = %self.location,
            "{line}"
        );
        self.lines.push(line);
    }

    /// Emit a diagnostic for an absorbed logic violation.
    pub(crate) fn warn(&mut self, line: impl Into<String>) {
        let line = line.into();
        warn!(
            target: "gumball::machine",
            location = %self.location,
            count = self.count,
            "{line}"
        );
        self.lines.push(line);
    }

    /// Release one gumball. Never drops the count below zero.
    ///
    /// Returns whether a gumball actually came out.
    pub(crate) fn release_ball(&mut self) -> bool {
        if self.count == 0 {
            self.warn("No gumball left to release; inventory stays at zero");
            return false;
        }
        self.say("A gumball comes rolling out the slot...");
        self.count -= 1;
        true
    }

    pub(crate) fn add(&mut self, amount: u32) -> u32 {
        self.count = self.count.saturating_add(amount);
        self.count
    }

    pub(crate) fn is_winner(&mut self) -> bool {
        self.spinner.is_winner()
    }

    /// Hand back the lines emitted since the last call.
    pub(crate) fn take_receipt(&mut self) -> Receipt {
        Receipt::new(std::mem::take(&mut self.lines))
    }
}
