use thiserror::Error;

use joueur_shared::{ProtocolError, SyncError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    /// The delta source will never deliver another message
    #[error("Delta source closed")]
    SourceClosed,
    #[error("Client is disconnected")]
    Disconnected,
}

impl ClientError {
    /// True when the session cannot continue.
    pub fn is_fatal(&self) -> bool {
        match self {
            ClientError::Sync(err) => err.is_fatal(),
            _ => true,
        }
    }
}
