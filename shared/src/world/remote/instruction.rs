use crate::{types::InstructionIndex, ObjectId};

/// A decoded field value. References are still identifiers here; they are
/// turned into handles by the [`ReferenceResolver`](super::reference_resolver::ReferenceResolver).
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Reference marker `{"id": ...}`, with the target type declared by the field
    Ref {
        id: ObjectId,
        target: Option<String>,
    },
    /// Full list, replaces the current value
    List(Vec<RawValue>),
    /// List sent as a delta: new length plus the entries that changed
    ListDelta {
        len: usize,
        entries: Vec<(usize, RawValue)>,
    },
    /// Nested record, merged entry by entry into the current value
    Record(Vec<(String, RawValue)>),
    /// `"&RM"`: remove the field or entry
    Removed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldUpdate {
    pub name: String,
    pub value: RawValue,
}

/// One primitive mutation of the object graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Delete {
        index: InstructionIndex,
        id: ObjectId,
    },
    CreateOrUpdate {
        index: InstructionIndex,
        id: ObjectId,
        type_tag: String,
        fields: Vec<FieldUpdate>,
    },
}

impl Instruction {
    pub fn index(&self) -> InstructionIndex {
        match self {
            Instruction::Delete { index, .. } => *index,
            Instruction::CreateOrUpdate { index, .. } => *index,
        }
    }

    pub fn id(&self) -> &ObjectId {
        match self {
            Instruction::Delete { id, .. } => id,
            Instruction::CreateOrUpdate { id, .. } => id,
        }
    }
}
