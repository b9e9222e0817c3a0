// Gateway traits for the tank backend (data source and control sink)
use crate::domain::control::ControlCommand;
use crate::domain::snapshot::{DecodeError, Snapshot};
use async_trait::async_trait;
use thiserror::Error;

/// Transient failures talking to the backend. None of them are fatal: the
/// polling loop skips the cycle and the dispatcher logs and moves on.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch and decode one process snapshot
    async fn fetch_snapshot(&self) -> Result<Snapshot, GatewayError>;
}

#[async_trait]
pub trait ControlSink: Send + Sync {
    /// Send one command; success means the backend answered with a 2xx status
    async fn send_command(&self, command: &ControlCommand) -> Result<(), GatewayError>;
}
