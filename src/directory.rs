//! Name table for exported machines.
//!
//! A `Directory` is created by whoever bootstraps the machines and lives
//! as long as they keep it. It maps names to handles and owns nothing
//! else: a bound handle keeps neither the machine nor its server alive.

use crate::remote::RemoteHandle;
use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// A name had nothing bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("No machine bound under '{name}'")]
    NotBound { name: String },
}

#[derive(Debug, Default)]
/// Name-to-handle table for exported machines.
pub struct Directory {
    entries: DashMap<String, RemoteHandle>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` under `name`, silently replacing any earlier entry.
    pub fn bind(&self, name: impl Into<String>, handle: RemoteHandle) {
        let name = name.into();
        let export_id = handle.export_id();
        if let Some(previous) = self.entries.insert(name.clone(), handle) {
            debug!(
                target: "gumball::directory",
                name = %name,
                previous = %previous.export_id(),
                export_id = %export_id,
                "Replaced binding"
            );
        } else {
            debug!(
                target: "gumball::directory",
                name = %name,
                export_id = %export_id,
                "Bound"
            );
        }
    }

    /// Handle bound under `name`.
    pub fn lookup(&self, name: &str) -> Result<RemoteHandle, LookupError> {
        match self.entries.get(name) {
            Some(entry) => Ok(entry.value().clone()),
            None => {
                warn!(
                    target: "gumball::directory",
                    name = %name,
                    "Lookup failed"
                );
                Err(LookupError::NotBound {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Whether anything is bound under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
