use std::{
    collections::VecDeque,
    sync::mpsc::{Receiver, TryRecvError},
};

use crate::error::ClientError;

/// Anything that can hand over delta messages, in server order.
pub trait DeltaSource {
    /// Returns the next available message, or `None` if nothing is pending.
    fn receive(&mut self) -> Result<Option<String>, ClientError>;
}

impl DeltaSource for Receiver<String> {
    fn receive(&mut self) -> Result<Option<String>, ClientError> {
        match self.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ClientError::SourceClosed),
        }
    }
}

impl DeltaSource for VecDeque<String> {
    fn receive(&mut self) -> Result<Option<String>, ClientError> {
        Ok(self.pop_front())
    }
}
