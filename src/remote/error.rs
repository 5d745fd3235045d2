//! Call boundary error types.

use thiserror::Error;

/// A remote call that could not complete.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The server behind the handle is gone or stopped answering
    #[error("Machine '{location}' is unreachable: the remote end hung up")]
    Disconnected { location: String },

    /// The request could not be encoded for transmission
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// The reply could not be decoded
    #[error("Failed to decode reply: {0}")]
    Decode(String),

    /// The server received the call but could not serve it
    #[error("Remote fault: {0}")]
    Fault(String),

    /// The server thread could not be started
    #[error("Failed to start server for '{location}': {source}")]
    ServerStart {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered a different question than was asked
    #[error("Unexpected reply to {request}: got {reply}")]
    UnexpectedReply {
        request: &'static str,
        reply: &'static str,
    },
}
