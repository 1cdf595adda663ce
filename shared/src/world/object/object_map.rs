use std::collections::HashMap;

use log::debug;

use crate::{
    types::InstructionIndex,
    world::{
        object::{object_handle::ObjectHandle, object_id::ObjectId, object_kinds::ObjectKinds},
        remote::error::SyncError,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectState {
    /// Created by a forward reference, fields not yet received
    Placeholder,
    Live,
    /// Tombstoned by a delete instruction
    Removed,
}

#[derive(Clone, Debug)]
pub struct ObjectRecord {
    id: ObjectId,
    type_tag: Option<String>,
    state: ObjectState,
}

impl ObjectRecord {
    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// `None` only for a placeholder whose referencing field declared no target type.
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    pub fn state(&self) -> ObjectState {
        self.state
    }

    pub fn is_present(&self) -> bool {
        self.state != ObjectState::Removed
    }
}

/// Outcome of registering an identifier with a concrete type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// First time this identifier was seen
    Created,
    /// A placeholder received its first create instruction
    Completed,
    /// Already live under the same type
    Existing,
}

/// Identifier registry: the single source of truth for which objects exist.
#[derive(Clone, Debug, Default)]
pub struct ObjectMap {
    id_to_handle: HashMap<ObjectId, ObjectHandle>,
    records: Vec<ObjectRecord>,
}

impl ObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of a live or placeholder object.
    pub fn get(&self, id: &ObjectId) -> Option<ObjectHandle> {
        let handle = self.id_to_handle.get(id)?;
        if self.records[handle.index()].is_present() {
            Some(*handle)
        } else {
            None
        }
    }

    /// Like [`ObjectMap::get`], but tells removed objects apart from unknown ones.
    pub fn try_get(&self, id: &ObjectId) -> Result<ObjectHandle, SyncError> {
        match self.id_to_handle.get(id) {
            Some(handle) if self.records[handle.index()].is_present() => Ok(*handle),
            Some(_) => Err(SyncError::ObjectRemoved { id: id.clone() }),
            None => Err(SyncError::ObjectNotFound { id: id.clone() }),
        }
    }

    /// Handle ever allocated for this identifier, including removed objects.
    pub fn handle(&self, id: &ObjectId) -> Option<ObjectHandle> {
        self.id_to_handle.get(id).copied()
    }

    pub fn record(&self, handle: ObjectHandle) -> Option<&ObjectRecord> {
        self.records.get(handle.index())
    }

    pub fn id(&self, handle: ObjectHandle) -> Option<&ObjectId> {
        self.record(handle).map(ObjectRecord::id)
    }

    pub fn type_tag(&self, handle: ObjectHandle) -> Option<&str> {
        self.record(handle).and_then(ObjectRecord::type_tag)
    }

    pub fn is_tombstoned(&self, id: &ObjectId) -> bool {
        self.id_to_handle
            .get(id)
            .is_some_and(|handle| self.records[handle.index()].state == ObjectState::Removed)
    }

    /// Number of live and placeholder objects.
    pub fn len(&self) -> usize {
        self.records.iter().filter(|record| record.is_present()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &ObjectRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (ObjectHandle::new(index as u32), record))
    }

    /// Returns the handle for `id`, creating a placeholder if it was never seen.
    ///
    /// The boolean is true when a placeholder was created. A removed
    /// identifier resolves to its tombstoned handle.
    pub fn get_or_create_placeholder(
        &mut self,
        kinds: &ObjectKinds,
        id: &ObjectId,
        type_tag: Option<&str>,
        index: InstructionIndex,
    ) -> Result<(ObjectHandle, bool), SyncError> {
        let Some(handle) = self.id_to_handle.get(id).copied() else {
            let handle = self.allocate(id, type_tag, ObjectState::Placeholder);
            debug!("Created placeholder {:?} for object {} ({:?})", handle, id, type_tag);
            return Ok((handle, true));
        };

        let Some(wanted) = type_tag else {
            return Ok((handle, false));
        };
        let record = &mut self.records[handle.index()];
        let current = record.type_tag.clone();
        match (record.state, current.as_deref()) {
            (ObjectState::Removed, _) => {}
            (_, None) => {
                record.type_tag = Some(wanted.to_string());
            }
            (ObjectState::Placeholder, Some(existing)) => {
                if !kinds.are_related(existing, wanted) {
                    return Err(Self::conflict(id, existing, wanted, index));
                }
                let narrowest = kinds.narrowest(existing, wanted).to_string();
                record.type_tag = Some(narrowest);
            }
            (ObjectState::Live, Some(existing)) => {
                if !kinds.is_kind_of(existing, wanted) {
                    return Err(Self::conflict(id, existing, wanted, index));
                }
            }
        }
        Ok((handle, false))
    }

    /// Registers `id` as a concrete object of type `type_tag`.
    ///
    /// Fails when the identifier is live under an unrelated type, or was removed.
    pub fn register(
        &mut self,
        kinds: &ObjectKinds,
        id: &ObjectId,
        type_tag: &str,
        index: InstructionIndex,
    ) -> Result<(ObjectHandle, Registration), SyncError> {
        let Some(handle) = self.id_to_handle.get(id).copied() else {
            let handle = self.allocate(id, Some(type_tag), ObjectState::Live);
            return Ok((handle, Registration::Created));
        };

        let record = &mut self.records[handle.index()];
        match record.state {
            ObjectState::Removed => Err(SyncError::IdentifierReused {
                id: id.clone(),
                index,
            }),
            ObjectState::Placeholder => {
                if let Some(existing) = record.type_tag.as_deref() {
                    if !kinds.is_kind_of(type_tag, existing) {
                        return Err(Self::conflict(id, existing, type_tag, index));
                    }
                }
                record.type_tag = Some(type_tag.to_string());
                record.state = ObjectState::Live;
                Ok((handle, Registration::Completed))
            }
            ObjectState::Live => {
                let existing = record.type_tag.as_deref().unwrap_or_default();
                if existing != type_tag {
                    return Err(Self::conflict(id, existing, type_tag, index));
                }
                Ok((handle, Registration::Existing))
            }
        }
    }

    /// Tombstones `id`. Returns `None` if it was unknown or already removed.
    pub fn remove(&mut self, id: &ObjectId) -> Option<ObjectHandle> {
        let handle = self.get(id)?;
        self.records[handle.index()].state = ObjectState::Removed;
        Some(handle)
    }

    fn allocate(&mut self, id: &ObjectId, type_tag: Option<&str>, state: ObjectState) -> ObjectHandle {
        let handle = ObjectHandle::new(self.records.len() as u32);
        self.records.push(ObjectRecord {
            id: id.clone(),
            type_tag: type_tag.map(str::to_string),
            state,
        });
        self.id_to_handle.insert(id.clone(), handle);
        handle
    }

    fn conflict(id: &ObjectId, existing: &str, incoming: &str, index: InstructionIndex) -> SyncError {
        SyncError::IdentifierConflict {
            id: id.clone(),
            existing: existing.to_string(),
            incoming: incoming.to_string(),
            index,
        }
    }
}
