use crate::constants::DEFAULT_MAX_LIST_LEN;

/// Tuning knobs for the synchronization core, set once per session.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Number of deltas, counting the one that created it, within which a
    /// placeholder must receive its own create instruction. Values below 1
    /// behave as 1.
    pub placeholder_ttl: u32,
    /// Largest `&LEN` accepted in a list delta. Longer lists are a decode error.
    pub max_list_len: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            placeholder_ttl: 3,
            max_list_len: DEFAULT_MAX_LIST_LEN,
        }
    }
}
