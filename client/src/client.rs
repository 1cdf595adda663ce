use log::{debug, info, warn};
use serde_json::Value;

use joueur_shared::{
    DeltaReport, GraphView, Protocol, RemoteWorldManager, SnapshotReader, SyncError,
};

use crate::{
    client_config::ClientConfig,
    delta_source::DeltaSource,
    error::ClientError,
    events::{SyncEvent, SyncEvents},
};

/// Client can receive deltas from a game server and exposes the resulting
/// object graph to the player's decision logic
pub struct Client {
    config: ClientConfig,
    manager: RemoteWorldManager,
    events: SyncEvents,
    disconnected: bool,
}

impl Client {
    /// Create a new Client
    pub fn new(protocol: Protocol, config: ClientConfig) -> Result<Self, ClientError> {
        let manager = RemoteWorldManager::new(protocol, config.sync.clone())?;
        Ok(Self {
            config,
            manager,
            events: SyncEvents::new(),
            disconnected: false,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Applies every message the source has pending. Returns how many were applied.
    ///
    /// Stops at the first message that fails to apply. Messages after it stay
    /// in the source.
    pub fn receive(&mut self, source: &mut dyn DeltaSource) -> Result<usize, ClientError> {
        let mut applied = 0;
        while let Some(message) = source.receive()? {
            self.apply(&message)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Applies one delta message.
    pub fn apply(&mut self, message: &str) -> Result<(), ClientError> {
        self.check_connected()?;
        if self.config.log_deltas {
            debug!("Received delta: {}", message);
        }
        let report = self.manager.apply_delta_str(message);
        self.record(report)
    }

    /// Applies one already parsed delta message.
    pub fn apply_value(&mut self, message: &Value) -> Result<(), ClientError> {
        self.check_connected()?;
        if self.config.log_deltas {
            debug!("Received delta: {}", message);
        }
        let report = self.manager.apply_delta(message);
        self.record(report)
    }

    /// Drains the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<SyncEvent> {
        self.events.take()
    }

    pub fn events(&self) -> &SyncEvents {
        &self.events
    }

    /// The latest fully applied state.
    pub fn graph(&self) -> GraphView {
        self.manager.current_graph()
    }

    /// A handle other threads can use to read the latest state.
    pub fn reader(&self) -> SnapshotReader {
        self.manager.reader()
    }

    pub fn is_connected(&self) -> bool {
        !self.disconnected
    }

    /// Ends the session. Every object is dropped and readers see an empty graph.
    pub fn disconnect(&mut self) {
        if self.disconnected {
            return;
        }
        info!("Client disconnecting");
        self.manager.reset();
        self.events.clear();
        self.disconnected = true;
    }

    fn check_connected(&self) -> Result<(), ClientError> {
        if self.disconnected {
            return Err(ClientError::Disconnected);
        }
        Ok(())
    }

    fn record(&mut self, report: Result<DeltaReport, SyncError>) -> Result<(), ClientError> {
        match report {
            Ok(report) => {
                self.events.push_report(report);
                Ok(())
            }
            Err(err) => {
                if err.is_fatal() {
                    warn!("Session can no longer be synchronized: {}", err);
                }
                Err(err.into())
            }
        }
    }
}
