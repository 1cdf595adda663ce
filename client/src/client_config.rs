use joueur_shared::SyncConfig;

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Settings for the synchronization core
    pub sync: SyncConfig,
    /// Logs every received delta message at debug level
    pub log_deltas: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            log_deltas: false,
        }
    }
}
