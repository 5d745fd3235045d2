//! Gumball: a vending state machine with a remote monitoring boundary
//!
//! A [`GumballMachine`] runs a five-state vending machine. Its handlers are
//! pure transitions over a tagged state; the machine applies the state they
//! return and records it in a bounded history. Machines are exported on a
//! server thread and bound by location in a [`Directory`], where monitors
//! look them up and read them through blocking remote calls.
//!
//! # Core Concepts
//!
//! - **State**: `VendingState`, a closed set of behavior-only variants
//! - **Machine**: owns inventory, location, and the active state
//! - **Boundary**: reads cross as encoded frames; state crosses as a `StateSnapshot`
//! - **Directory**: an explicit name table, not ambient global state
//!
//! # Example
//!
//! ```rust
//! use gumball::config::ServerConfig;
//! use gumball::directory::Directory;
//! use gumball::machine::{GumballMachine, ScriptedSpinner};
//! use gumball::monitor::GumballMonitor;
//! use gumball::remote::export;
//!
//! let machine = GumballMachine::with_spinner("santafe", 10, ScriptedSpinner::never_win())
//!     .into_shared();
//! let directory = Directory::new();
//! let _export = export(machine.clone(), &directory, &ServerConfig::default()).unwrap();
//!
//! machine.lock().insert_quarter();
//! machine.lock().turn_crank();
//!
//! let monitor = GumballMonitor::new(directory.lookup("santafe").unwrap());
//! let report = monitor.report().unwrap();
//! assert_eq!(report.count, 9);
//! assert_eq!(report.state.tag, "waiting for quarter");
//! ```

pub mod config;
pub mod core;
pub mod directory;
pub mod machine;
pub mod monitor;
pub mod remote;

// Re-export commonly used types
pub use crate::core::{Operation, State, StateHistory, StateTransition, VendingState};
pub use directory::{Directory, LookupError};
pub use machine::{GumballMachine, Receipt, SharedMachine};
pub use monitor::{GumballMonitor, MachineReport};
pub use remote::{GumballMachineRemote, RemoteError, RemoteHandle, StateSnapshot};
