use std::collections::BTreeMap;

use super::{field_value::FieldValue, object_id::ObjectId};

/// The field data of one synced game object.
///
/// Only the synchronization core can mutate a `GameObject`; everything handed
/// to decision logic is a shared reference into a published snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct GameObject {
    id: ObjectId,
    fields: BTreeMap<String, FieldValue>,
}

impl GameObject {
    pub(crate) fn new(id: ObjectId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn fields_mut(&mut self) -> &mut BTreeMap<String, FieldValue> {
        &mut self.fields
    }
}
