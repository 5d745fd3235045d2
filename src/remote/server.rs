//! The machine's side of the call boundary.

use super::error::RemoteError;
use super::handle::{Envelope, RemoteHandle};
use super::snapshot::StateSnapshot;
use super::wire::{self, Reply, Request};
use crate::config::ServerConfig;
use crate::directory::Directory;
use crate::machine::SharedMachine;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// A machine being served to remote callers.
///
/// Stopping the export (explicitly or by dropping it) ends the server
/// thread. Handles already given out stay in the directory but fail
/// every call from then on.
pub struct ExportedMachine {
    handle: RemoteHandle,
    stopping: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

/// Serve `machine` on its own thread and bind it in `directory` under its
/// location.
pub fn export(
    machine: SharedMachine,
    directory: &Directory,
    config: &ServerConfig,
) -> Result<ExportedMachine, RemoteError> {
    let location = machine.lock().location().to_string();
    let export_id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
    let stopping = Arc::new(AtomicBool::new(false));

    let worker = thread::Builder::new()
        .name(format!("gumball-{location}"))
        .spawn({
            let location = location.clone();
            let stopping = Arc::clone(&stopping);
            move || serve(machine, rx, stopping, location, export_id)
        })
        .map_err(|source| RemoteError::ServerStart {
            location: location.clone(),
            source,
        })?;

    let handle = RemoteHandle::new(location.clone(), export_id, tx);
    directory.bind(location.clone(), handle.clone());

    info!(
        target: "gumball::remote",
        location = %location,
        export_id = %export_id,
        "Machine exported"
    );

    Ok(ExportedMachine {
        handle,
        stopping,
        worker: Some(worker),
    })
}

impl ExportedMachine {
    /// A new handle to this export.
    pub fn handle(&self) -> RemoteHandle {
        self.handle.clone()
    }

    /// Location the machine is bound under.
    pub fn location(&self) -> &str {
        self.handle.location()
    }

    /// Stop serving and wait for the server thread to exit.
    ///
    /// Safe to call, or drop the export, from inside an async runtime.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        self.stopping.store(true, Ordering::Release);
        if !self.handle.request_shutdown() {
            debug!(
                target: "gumball::remote",
                location = %self.handle.location(),
                "Server already gone"
            );
        }
        if worker.join().is_err() {
            error!(
                target: "gumball::remote",
                location = %self.handle.location(),
                "Server thread panicked"
            );
        }
    }
}

impl Drop for ExportedMachine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn serve(
    machine: SharedMachine,
    mut rx: mpsc::Receiver<Envelope>,
    stopping: Arc<AtomicBool>,
    location: String,
    export_id: Uuid,
) {
    debug!(
        target: "gumball::remote",
        location = %location,
        export_id = %export_id,
        "Server started"
    );

    while let Some(envelope) = rx.blocking_recv() {
        let (frame, reply) = match envelope {
            Envelope::Call { frame, reply } => (frame, reply),
            Envelope::Shutdown => break,
        };

        let answer = respond(&machine, &frame, &location);
        match wire::encode_reply(&answer) {
            Ok(bytes) => {
                if reply.send(bytes).is_err() {
                    debug!(
                        target: "gumball::remote",
                        location = %location,
                        "Caller went away before the reply"
                    );
                }
            }
            // Dropping `reply` surfaces as a disconnect to the caller.
            Err(e) => error!(
                target: "gumball::remote",
                location = %location,
                error = %e,
                "Failed to encode reply"
            ),
        }

        if stopping.load(Ordering::Acquire) {
            break;
        }
    }

    // Calls still queued are dropped; their callers see a disconnect.
    rx.close();
    info!(
        target: "gumball::remote",
        location = %location,
        export_id = %export_id,
        "Server stopped"
    );
}

fn respond(machine: &SharedMachine, frame: &[u8], location: &str) -> Reply {
    let request = match wire::decode_request(frame) {
        Ok(request) => request,
        Err(e) => {
            warn!(
                target: "gumball::remote",
                location = %location,
                error = %e,
                "Rejected malformed call"
            );
            return Reply::Fault(e);
        }
    };

    let machine = machine.lock();
    match request {
        Request::GetCount => Reply::Count(machine.count()),
        Request::GetLocation => Reply::Location(machine.location().to_string()),
        Request::GetState => Reply::State(StateSnapshot::of(&machine.state())),
    }
}
