//! Request and reply frames.
//!
//! Every call is encoded to bytes on one side of the boundary and decoded
//! on the other, so only self-contained values ever make the trip.

use super::error::RemoteError;
use super::snapshot::StateSnapshot;
use serde::{Deserialize, Serialize};

/// The remotely callable reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    GetCount,
    GetLocation,
    GetState,
}

impl Request {
    /// Name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetCount => "get_count",
            Self::GetLocation => "get_location",
            Self::GetState => "get_state",
        }
    }
}

/// Answers to a [`Request`], or the fault that prevented one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    Count(u32),
    Location(String),
    State(StateSnapshot),
    Fault(String),
}

impl Reply {
    /// Name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Count(_) => "count",
            Self::Location(_) => "location",
            Self::State(_) => "state",
            Self::Fault(_) => "fault",
        }
    }
}

pub fn encode_request(request: Request) -> Result<Vec<u8>, RemoteError> {
    encode(request).map_err(RemoteError::Encode)
}

pub fn decode_request(bytes: &[u8]) -> Result<Request, String> {
    decode(bytes)
}

pub fn encode_reply(reply: &Reply) -> Result<Vec<u8>, String> {
    encode(reply)
}

pub fn decode_reply(bytes: &[u8]) -> Result<Reply, RemoteError> {
    decode(bytes).map_err(RemoteError::Decode)
}

fn encode<T: Serialize>(body: T) -> Result<Vec<u8>, String> {
    bincode::serialize(&body).map_err(|e| e.to_string())
}

fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, String> {
    bincode::deserialize(bytes).map_err(|e| e.to_string())
}
