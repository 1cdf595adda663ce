use std::collections::{BTreeMap, TryReserveError};

use crate::{
    types::InstructionIndex,
    world::{
        graph::object_graph::ObjectGraph,
        object::{field_value::FieldValue, object_handle::ObjectHandle, object_id::ObjectId},
        remote::{
            error::{DecodeLocation, SyncError},
            instruction::RawValue,
        },
    },
};

/// A field value ready to be committed: references are handles.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    /// Replace the current value
    Set(FieldValue),
    /// Merge entries into the current record
    Merge(Vec<(String, ResolvedValue)>),
    /// Resize the current list and overwrite the listed indices
    ListDelta {
        len: usize,
        entries: Vec<(usize, ResolvedValue)>,
    },
    Remove,
}

impl ResolvedValue {
    /// Commits this value under `key` of a record (or an object's field map).
    pub(crate) fn apply_to_record(
        self,
        record: &mut BTreeMap<String, FieldValue>,
        key: String,
    ) -> Result<(), TryReserveError> {
        match self {
            ResolvedValue::Set(value) => {
                record.insert(key, value);
            }
            ResolvedValue::Remove => {
                record.remove(&key);
            }
            other => {
                let slot = record.entry(key).or_insert(FieldValue::Null);
                other.apply_in_place(slot)?;
            }
        }
        Ok(())
    }

    fn apply_to_list(self, list: &mut [FieldValue], index: usize) -> Result<(), TryReserveError> {
        let Some(slot) = list.get_mut(index) else {
            return Ok(());
        };
        match self {
            ResolvedValue::Set(value) => *slot = value,
            ResolvedValue::Remove => *slot = FieldValue::Null,
            other => other.apply_in_place(slot)?,
        }
        Ok(())
    }

    fn apply_in_place(self, slot: &mut FieldValue) -> Result<(), TryReserveError> {
        match self {
            ResolvedValue::Set(value) => *slot = value,
            ResolvedValue::Remove => *slot = FieldValue::Null,
            ResolvedValue::Merge(entries) => {
                if !matches!(slot, FieldValue::Record(_)) {
                    *slot = FieldValue::Record(BTreeMap::new());
                }
                if let FieldValue::Record(record) = slot {
                    for (key, value) in entries {
                        value.apply_to_record(record, key)?;
                    }
                }
            }
            ResolvedValue::ListDelta { len, entries } => {
                if !matches!(slot, FieldValue::List(_)) {
                    *slot = FieldValue::List(Vec::new());
                }
                if let FieldValue::List(list) = slot {
                    resize_list(list, len)?;
                    for (index, value) in entries {
                        value.apply_to_list(list, index)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Resizes without aborting when the allocation cannot be made.
fn resize_list(list: &mut Vec<FieldValue>, len: usize) -> Result<(), TryReserveError> {
    if len > list.len() {
        list.try_reserve_exact(len - list.len())?;
    }
    list.resize(len, FieldValue::Null);
    Ok(())
}

/// Turns reference markers into handles while an instruction is applied.
///
/// An unknown identifier gets a placeholder, never a recursive construction of
/// the referenced object, so cyclic references such as
/// `Piece.lastMove -> Move.piece -> Piece` resolve in any order.
pub struct ReferenceResolver<'a> {
    graph: &'a mut ObjectGraph,
    index: InstructionIndex,
    placeholders: Vec<ObjectHandle>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(graph: &'a mut ObjectGraph, index: InstructionIndex) -> Self {
        Self {
            graph,
            index,
            placeholders: Vec::new(),
        }
    }

    /// Returns the handle for `id`, creating a placeholder if it is not registered yet.
    pub fn resolve_reference(
        &mut self,
        id: &ObjectId,
        target: Option<&str>,
    ) -> Result<ObjectHandle, SyncError> {
        let (kinds, object_map) = self.graph.split_mut();
        let (handle, created) = object_map.get_or_create_placeholder(kinds, id, target, self.index)?;
        if created {
            self.graph.ensure_object(handle);
            self.placeholders.push(handle);
        }
        Ok(handle)
    }

    pub fn resolve(&mut self, value: RawValue) -> Result<ResolvedValue, SyncError> {
        Ok(match value {
            RawValue::Record(entries) => {
                let mut output = Vec::with_capacity(entries.len());
                for (key, entry) in entries {
                    output.push((key, self.resolve(entry)?));
                }
                ResolvedValue::Merge(output)
            }
            RawValue::ListDelta { len, entries } => {
                let mut output = Vec::with_capacity(entries.len());
                for (index, entry) in entries {
                    output.push((index, self.resolve(entry)?));
                }
                ResolvedValue::ListDelta { len, entries: output }
            }
            RawValue::Removed => ResolvedValue::Remove,
            other => ResolvedValue::Set(self.materialize(other)?),
        })
    }

    /// Placeholders created so far by this resolver.
    pub fn into_placeholders(self) -> Vec<ObjectHandle> {
        self.placeholders
    }

    /// Builds a complete value, for contexts where nothing is merged.
    fn materialize(&mut self, value: RawValue) -> Result<FieldValue, SyncError> {
        Ok(match value {
            RawValue::Null | RawValue::Removed => FieldValue::Null,
            RawValue::Bool(value) => FieldValue::Bool(value),
            RawValue::Int(value) => FieldValue::Int(value),
            RawValue::Float(value) => FieldValue::Float(value),
            RawValue::Str(value) => FieldValue::Str(value),
            RawValue::Ref { id, target } => {
                FieldValue::Ref(self.resolve_reference(&id, target.as_deref())?)
            }
            RawValue::List(items) => {
                let mut output = Vec::with_capacity(items.len());
                for item in items {
                    output.push(self.materialize(item)?);
                }
                FieldValue::List(output)
            }
            RawValue::ListDelta { len, entries } => {
                let mut output = Vec::new();
                resize_list(&mut output, len).map_err(|err| {
                    SyncError::decode(
                        format!("list cannot be allocated: {}", err),
                        DecodeLocation::message().at(self.index),
                    )
                })?;
                for (index, entry) in entries {
                    let value = self.materialize(entry)?;
                    if let Some(slot) = output.get_mut(index) {
                        *slot = value;
                    }
                }
                FieldValue::List(output)
            }
            RawValue::Record(entries) => {
                let mut output = BTreeMap::new();
                for (key, entry) in entries {
                    if entry == RawValue::Removed {
                        continue;
                    }
                    output.insert(key, self.materialize(entry)?);
                }
                FieldValue::Record(output)
            }
        })
    }
}
