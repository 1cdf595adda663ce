use crate::{types::DeltaIndex, ObjectId, SyncError};

/// What one successfully applied delta changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaReport {
    pub delta_index: DeltaIndex,
    /// Objects whose create instruction was applied for the first time, in order
    pub created: Vec<ObjectId>,
    pub updated: Vec<ObjectId>,
    pub deleted: Vec<ObjectId>,
    /// Forward references created by this delta and still unpopulated at its end
    pub placeholders: Vec<ObjectId>,
    /// Instruction-level errors; the rest of the delta was applied
    pub skipped: Vec<SyncError>,
}

impl DeltaReport {
    pub(crate) fn new(delta_index: DeltaIndex) -> Self {
        Self {
            delta_index,
            ..Self::default()
        }
    }

    /// True when no instruction had to be skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
