//! Status text emitted by a machine operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ordered status lines one operation produced.
///
/// The text is for display and logging. Callers should not branch on it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    lines: Vec<String>,
}

impl Receipt {
    pub(crate) fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Lines in the order they were emitted.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Case-insensitive substring match across all lines.
    pub fn contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.lines
            .iter()
            .any(|line| line.to_lowercase().contains(&needle))
    }

    /// Whether the operation said nothing.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
