use std::{collections::BTreeMap, fmt};

use crate::world::{
    graph::object_graph::ObjectGraph,
    object::{
        field_value::FieldValue, game_object::GameObject, object_handle::ObjectHandle,
        object_id::ObjectId, object_map::ObjectState,
    },
    remote::error::SyncError,
};

/// Read-only handle to one object inside a published snapshot.
///
/// Two `ObjectRef`s are equal when they name the same object in the same
/// snapshot, which is how reference identity is checked.
#[derive(Clone, Copy)]
pub struct ObjectRef<'g> {
    graph: &'g ObjectGraph,
    handle: ObjectHandle,
    object: &'g GameObject,
}

impl<'g> ObjectRef<'g> {
    /// Resolves a handle, failing with `ObjectRemoved` if it was tombstoned.
    pub(crate) fn resolve(graph: &'g ObjectGraph, handle: ObjectHandle) -> Result<Self, SyncError> {
        let Some(record) = graph.object_map().record(handle) else {
            return Err(SyncError::ObjectNotFound {
                id: ObjectId::new(format!("#{}", handle.index())),
            });
        };
        if !record.is_present() {
            return Err(SyncError::ObjectRemoved {
                id: record.id().clone(),
            });
        }
        let Some(object) = graph.object(handle) else {
            return Err(SyncError::ObjectNotFound {
                id: record.id().clone(),
            });
        };
        Ok(Self {
            graph,
            handle,
            object,
        })
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn id(&self) -> &'g ObjectId {
        self.object.id()
    }

    /// `None` only for placeholders created by untyped references.
    pub fn type_tag(&self) -> Option<&'g str> {
        self.graph
            .object_map()
            .record(self.handle)
            .and_then(|record| record.type_tag())
    }

    pub fn is_kind_of(&self, tag: &str) -> bool {
        self.type_tag()
            .is_some_and(|own| self.graph.kinds().is_kind_of(own, tag))
    }

    /// True until the object's own create instruction has been applied.
    pub fn is_placeholder(&self) -> bool {
        self.graph
            .object_map()
            .record(self.handle)
            .is_some_and(|record| record.state() == ObjectState::Placeholder)
    }

    pub fn object(&self) -> &'g GameObject {
        self.object
    }

    pub fn same_object(&self, other: &ObjectRef<'_>) -> bool {
        self.handle == other.handle && std::ptr::eq(self.graph, other.graph)
    }

    // Fields

    pub fn field(&self, name: &str) -> Option<&'g FieldValue> {
        self.object.field(name)
    }

    pub fn try_field(&self, name: &str) -> Result<&'g FieldValue, SyncError> {
        self.object.field(name).ok_or_else(|| SyncError::FieldMissing {
            id: self.id().clone(),
            field: name.to_string(),
        })
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, SyncError> {
        let value = self.try_field(name)?;
        value.as_bool().ok_or_else(|| self.field_type(name, "bool"))
    }

    pub fn get_int(&self, name: &str) -> Result<i64, SyncError> {
        let value = self.try_field(name)?;
        value.as_int().ok_or_else(|| self.field_type(name, "int"))
    }

    pub fn get_float(&self, name: &str) -> Result<f64, SyncError> {
        let value = self.try_field(name)?;
        value.as_float().ok_or_else(|| self.field_type(name, "float"))
    }

    pub fn get_str(&self, name: &str) -> Result<&'g str, SyncError> {
        let value = self.try_field(name)?;
        value.as_str().ok_or_else(|| self.field_type(name, "string"))
    }

    pub fn list(&self, name: &str) -> Result<&'g [FieldValue], SyncError> {
        let value = self.try_field(name)?;
        value.as_list().ok_or_else(|| self.field_type(name, "list"))
    }

    pub fn record(&self, name: &str) -> Result<&'g BTreeMap<String, FieldValue>, SyncError> {
        let value = self.try_field(name)?;
        value.as_record().ok_or_else(|| self.field_type(name, "record"))
    }

    /// Follows a reference field. A null reference, or an unset one, is `Ok(None)`.
    pub fn reference(&self, name: &str) -> Result<Option<ObjectRef<'g>>, SyncError> {
        match self.object.field(name) {
            None | Some(FieldValue::Null) => Ok(None),
            Some(value) => self.follow(value).map(Some).map_err(|err| match err {
                SyncError::FieldType { .. } => self.field_type(name, "reference"),
                err => err,
            }),
        }
    }

    /// Follows every reference in a list field, skipping null entries.
    pub fn references(&self, name: &str) -> Result<Vec<ObjectRef<'g>>, SyncError> {
        let mut output = Vec::new();
        for value in self.list(name)? {
            if value.is_null() {
                continue;
            }
            output.push(self.follow(value).map_err(|err| match err {
                SyncError::FieldType { .. } => self.field_type(name, "list of references"),
                err => err,
            })?);
        }
        Ok(output)
    }

    /// Resolves a single reference value found anywhere in this object's fields.
    pub fn follow(&self, value: &FieldValue) -> Result<ObjectRef<'g>, SyncError> {
        match value {
            FieldValue::Ref(handle) => ObjectRef::resolve(self.graph, *handle),
            _ => Err(self.field_type("<value>", "reference")),
        }
    }

    fn field_type(&self, name: &str, expected: &'static str) -> SyncError {
        SyncError::FieldType {
            id: self.id().clone(),
            field: name.to_string(),
            expected,
        }
    }
}

impl PartialEq for ObjectRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl Eq for ObjectRef<'_> {}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("id", self.id())
            .field("type_tag", &self.type_tag())
            .field("placeholder", &self.is_placeholder())
            .finish()
    }
}
