//! Typed, read-only views over synced game objects, one module per game.

use joueur_shared::{GraphView, ObjectId, ObjectRef, SyncError};

pub mod chess;

/// A typed view over one synced object of a known type tag.
pub trait GameObjectType<'g>: Sized {
    const TAG: &'static str;

    /// Wraps an object already known to be of this type.
    fn wrap(object: ObjectRef<'g>) -> Self;

    fn object(&self) -> ObjectRef<'g>;

    /// Fails with `WrongType` unless the object is of this type or a subtype.
    fn try_from_ref(object: ObjectRef<'g>) -> Result<Self, SyncError> {
        if !object.is_kind_of(Self::TAG) {
            return Err(SyncError::WrongType {
                id: object.id().clone(),
                expected: Self::TAG.to_string(),
                actual: object.type_tag().unwrap_or_default().to_string(),
            });
        }
        Ok(Self::wrap(object))
    }

    fn get(graph: &'g GraphView, id: impl Into<ObjectId>) -> Result<Self, SyncError> {
        Self::try_from_ref(graph.get(id)?)
    }

    /// Every object of this type in the graph, in creation order.
    fn all(graph: &'g GraphView) -> Vec<Self> {
        graph.objects_of_type(Self::TAG).map(Self::wrap).collect()
    }

    fn id(&self) -> &'g ObjectId {
        self.object().id()
    }
}

/// Follows an optional reference field into a typed view.
pub(crate) fn optional<'g, T: GameObjectType<'g>>(
    object: &ObjectRef<'g>,
    field: &str,
) -> Result<Option<T>, SyncError> {
    object.reference(field)?.map(T::try_from_ref).transpose()
}

/// Follows a reference field that the server always sets.
pub(crate) fn required<'g, T: GameObjectType<'g>>(
    object: &ObjectRef<'g>,
    field: &str,
) -> Result<T, SyncError> {
    optional(object, field)?.ok_or_else(|| SyncError::FieldMissing {
        id: object.id().clone(),
        field: field.to_string(),
    })
}

/// Follows a list of references into typed views, skipping nulls.
pub(crate) fn list<'g, T: GameObjectType<'g>>(
    object: &ObjectRef<'g>,
    field: &str,
) -> Result<Vec<T>, SyncError> {
    object
        .references(field)?
        .into_iter()
        .map(T::try_from_ref)
        .collect()
}
