use std::vec::IntoIter;

use joueur_shared::{DeltaReport, ObjectId, SyncError};

/// Something a delta did to the object graph.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncEvent {
    Created(ObjectId),
    Updated(ObjectId),
    Deleted(ObjectId),
    /// An instruction was dropped and the rest of its delta applied
    InstructionSkipped(SyncError),
}

/// Events accumulated since they were last taken.
pub struct SyncEvents {
    events: Vec<SyncEvent>,
}

impl Default for SyncEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncEvents {
    pub(crate) fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyncEvent> {
        self.events.iter()
    }

    pub(crate) fn push_report(&mut self, report: DeltaReport) {
        let DeltaReport {
            created,
            updated,
            deleted,
            skipped,
            ..
        } = report;
        self.events.extend(deleted.into_iter().map(SyncEvent::Deleted));
        self.events.extend(created.into_iter().map(SyncEvent::Created));
        self.events.extend(updated.into_iter().map(SyncEvent::Updated));
        self.events
            .extend(skipped.into_iter().map(SyncEvent::InstructionSkipped));
    }

    pub(crate) fn take(&mut self) -> Vec<SyncEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }
}

impl IntoIterator for SyncEvents {
    type Item = SyncEvent;
    type IntoIter = IntoIter<SyncEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
