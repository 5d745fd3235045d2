//! The caller's side of the call boundary.

use super::error::RemoteError;
use super::snapshot::StateSnapshot;
use super::wire::{self, Reply, Request};
use std::fmt;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::trace;
use uuid::Uuid;

/// The read operations a machine exposes to remote callers.
///
/// Each call blocks until the reply arrives or the call fails.
pub trait GumballMachineRemote {
    fn get_count(&self) -> Result<u32, RemoteError>;

    fn get_location(&self) -> Result<String, RemoteError>;

    fn get_state(&self) -> Result<StateSnapshot, RemoteError>;
}

/// One queued call, or the signal to stop serving.
pub(crate) enum Envelope {
    Call {
        frame: Vec<u8>,
        reply: oneshot::Sender<Vec<u8>>,
    },
    Shutdown,
}

/// Cloneable handle to an exported machine.
///
/// The handle holds only a channel to the machine's server, never the
/// machine itself. Once the server stops, every call fails with
/// [`RemoteError::Disconnected`].
///
/// Calls block the current thread, so a handle must not be used from
/// inside an async runtime's worker threads.
#[derive(Clone)]
pub struct RemoteHandle {
    location: String,
    export_id: Uuid,
    tx: mpsc::Sender<Envelope>,
}

impl RemoteHandle {
    pub(crate) fn new(location: String, export_id: Uuid, tx: mpsc::Sender<Envelope>) -> Self {
        Self {
            location,
            export_id,
            tx,
        }
    }

    /// Location the machine was exported under.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Identifies the export this handle points at.
    pub fn export_id(&self) -> Uuid {
        self.export_id
    }

    /// Whether the server is still accepting calls.
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Wake the server so it sees the stop flag. Never blocks.
    ///
    /// Returns `false` if the server was already gone. A full queue still
    /// counts as delivered: the server checks the flag after every call.
    pub(crate) fn request_shutdown(&self) -> bool {
        match self.tx.try_send(Envelope::Shutdown) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Closed(_)) => false,
        }
    }

    fn call(&self, request: Request) -> Result<Reply, RemoteError> {
        let frame = wire::encode_request(request)?;
        let (reply_tx, reply_rx) = oneshot::channel();

        trace!(
            target: "gumball::remote",
            location = %self.location,
            export_id = %self.export_id,
            request = request.name(),
            "Sending call"
        );

        self.tx
            .blocking_send(Envelope::Call {
                frame,
                reply: reply_tx,
            })
            .map_err(|_| self.disconnected())?;
        let bytes = reply_rx.blocking_recv().map_err(|_| self.disconnected())?;

        match wire::decode_reply(&bytes)? {
            Reply::Fault(message) => Err(RemoteError::Fault(message)),
            reply => Ok(reply),
        }
    }

    fn disconnected(&self) -> RemoteError {
        RemoteError::Disconnected {
            location: self.location.clone(),
        }
    }
}

fn unexpected(request: Request, reply: &Reply) -> RemoteError {
    RemoteError::UnexpectedReply {
        request: request.name(),
        reply: reply.name(),
    }
}

impl GumballMachineRemote for RemoteHandle {
    fn get_count(&self) -> Result<u32, RemoteError> {
        match self.call(Request::GetCount)? {
            Reply::Count(count) => Ok(count),
            other => Err(unexpected(Request::GetCount, &other)),
        }
    }

    fn get_location(&self) -> Result<String, RemoteError> {
        match self.call(Request::GetLocation)? {
            Reply::Location(location) => Ok(location),
            other => Err(unexpected(Request::GetLocation, &other)),
        }
    }

    fn get_state(&self) -> Result<StateSnapshot, RemoteError> {
        match self.call(Request::GetState)? {
            Reply::State(snapshot) => Ok(snapshot),
            other => Err(unexpected(Request::GetState, &other)),
        }
    }
}

impl fmt::Debug for RemoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("location", &self.location)
            .field("export_id", &self.export_id)
            .field("connected", &self.is_connected())
            .finish()
    }
}
