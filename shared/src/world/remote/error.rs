use std::fmt;

use thiserror::Error;

use crate::{types::InstructionIndex, DeltaIndex, ObjectId};

/// Where in a delta a decode error was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeLocation {
    pub index: Option<InstructionIndex>,
    pub id: Option<ObjectId>,
    pub field: Option<String>,
}

impl DecodeLocation {
    pub fn message() -> Self {
        Self::default()
    }

    pub fn object(id: &ObjectId) -> Self {
        Self {
            id: Some(id.clone()),
            ..Self::default()
        }
    }

    pub fn at(mut self, index: InstructionIndex) -> Self {
        self.index = Some(index);
        self
    }

    pub fn field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

impl fmt::Display for DecodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(index) = self.index {
            parts.push(format!("instruction {}", index));
        }
        if let Some(id) = &self.id {
            parts.push(format!("object {}", id));
        }
        if let Some(field) = &self.field {
            parts.push(format!("field `{}`", field));
        }
        if parts.is_empty() {
            f.write_str("message")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Errors raised while synchronizing the game object graph.
///
/// Decode and unknown-type errors are recovered locally. Identifier conflicts
/// and expired placeholders mean the graph can no longer be trusted; see
/// [`SyncError::is_fatal`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    // Message-level errors

    /// Delta structure could not be decoded; the whole delta was discarded
    #[error("Malformed delta at {location}: {reason}")]
    Decode {
        reason: String,
        location: DecodeLocation,
    },

    // Instruction-level errors

    /// Type tag not registered with the Protocol; the instruction was skipped
    #[error("Unknown type `{tag}` for object {id} at instruction {index}. Must call `add_type()` during protocol initialization")]
    UnknownType {
        id: ObjectId,
        tag: String,
        index: InstructionIndex,
    },

    // Session-fatal errors

    /// A live identifier was claimed under an unrelated type tag
    #[error("Identifier {id} already registered as `{existing}`, cannot re-register as `{incoming}` (instruction {index})")]
    IdentifierConflict {
        id: ObjectId,
        existing: String,
        incoming: String,
        index: InstructionIndex,
    },

    /// A removed identifier was created again
    #[error("Identifier {id} was removed earlier in the session and cannot be reused (instruction {index})")]
    IdentifierReused {
        id: ObjectId,
        index: InstructionIndex,
    },

    /// A forward reference was never filled in
    #[error("Placeholder for object {id}, created in delta {created}, was not populated within {ttl} deltas")]
    PlaceholderExpired {
        id: ObjectId,
        created: DeltaIndex,
        ttl: u32,
    },

    /// A fatal error was reported earlier; no further deltas are accepted
    #[error("Session state is no longer trusted after a fatal synchronization error")]
    SessionPoisoned,

    // Read errors

    /// Object was removed by a delta
    #[error("Object {id} has been removed")]
    ObjectRemoved { id: ObjectId },

    /// Identifier never seen in this session
    #[error("Object {id} not found")]
    ObjectNotFound { id: ObjectId },

    /// Field not set on the object
    #[error("Object {id} has no field `{field}`")]
    FieldMissing { id: ObjectId, field: String },

    /// Field holds a value of another kind
    #[error("Field `{field}` of object {id} is not a {expected}")]
    FieldType {
        id: ObjectId,
        field: String,
        expected: &'static str,
    },

    /// Object does not have the requested type
    #[error("Object {id} is a `{actual}`, expected `{expected}`")]
    WrongType {
        id: ObjectId,
        expected: String,
        actual: String,
    },
}

impl SyncError {
    pub fn decode(reason: impl Into<String>, location: DecodeLocation) -> Self {
        SyncError::Decode {
            reason: reason.into(),
            location,
        }
    }

    /// Fatal errors mean the graph's integrity is lost and the session must end.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::IdentifierConflict { .. }
                | SyncError::IdentifierReused { .. }
                | SyncError::PlaceholderExpired { .. }
                | SyncError::SessionPoisoned
        )
    }
}
