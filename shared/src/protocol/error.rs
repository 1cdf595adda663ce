use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// Type tag was never registered
    #[error("Type `{tag}` is not registered. Must call `add_type()` during protocol initialization")]
    TypeNotRegistered { tag: String },

    /// A type extends a tag that was never registered
    #[error("Type `{tag}` extends `{parent}`, which is not registered")]
    ParentNotRegistered { tag: String, parent: String },

    /// A type is its own ancestor
    #[error("Type `{tag}` inherits from itself")]
    InheritanceCycle { tag: String },

    /// A field references a type that was never registered
    #[error("Field `{field}` of type `{tag}` references unregistered type `{target}`")]
    ReferenceTargetNotRegistered {
        tag: String,
        field: String,
        target: String,
    },
}
