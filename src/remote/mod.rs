//! The call boundary between a machine and its remote observers.
//!
//! A machine is exported on a server thread and bound in a [`Directory`]
//! under its location. Callers look up a [`RemoteHandle`] and issue
//! blocking reads through the [`GumballMachineRemote`] trait. Requests and
//! replies are encoded with bincode on every call, and state crosses as a
//! [`StateSnapshot`] value, never as the machine's live state.
//!
//! [`Directory`]: crate::directory::Directory

mod error;
mod handle;
mod server;
mod snapshot;
mod wire;

pub use error::RemoteError;
pub use handle::{GumballMachineRemote, RemoteHandle};
pub use server::{export, ExportedMachine};
pub use snapshot::StateSnapshot;
pub use wire::{Reply, Request};
