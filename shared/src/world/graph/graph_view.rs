use std::sync::Arc;

use crate::{
    types::DeltaIndex,
    world::{
        graph::{object_graph::ObjectGraph, object_ref::ObjectRef},
        object::{object_handle::ObjectHandle, object_id::ObjectId, object_kinds::ObjectKinds,
                 object_map::ObjectState},
        remote::error::SyncError,
    },
};

/// Read-only view of the object graph as of one fully applied delta.
///
/// A view pins its snapshot: deltas applied after it was taken are not
/// visible through it, and it stays valid for as long as it is held.
#[derive(Clone, Debug)]
pub struct GraphView {
    graph: Arc<ObjectGraph>,
}

impl GraphView {
    pub(crate) fn new(graph: Arc<ObjectGraph>) -> Self {
        Self { graph }
    }

    /// Looks an object up by identifier.
    ///
    /// Removed objects fail with [`SyncError::ObjectRemoved`], never returning stale fields.
    pub fn get(&self, id: impl Into<ObjectId>) -> Result<ObjectRef<'_>, SyncError> {
        let id = id.into();
        let handle = self.graph.object_map().try_get(&id)?;
        ObjectRef::resolve(&self.graph, handle)
    }

    pub fn contains(&self, id: impl Into<ObjectId>) -> bool {
        self.graph.object_map().get(&id.into()).is_some()
    }

    pub fn is_removed(&self, id: impl Into<ObjectId>) -> bool {
        self.graph.object_map().is_tombstoned(&id.into())
    }

    pub fn resolve(&self, handle: ObjectHandle) -> Result<ObjectRef<'_>, SyncError> {
        ObjectRef::resolve(&self.graph, handle)
    }

    /// The game singleton, once the server has sent any top-level game field.
    pub fn game(&self) -> Option<ObjectRef<'_>> {
        let handle = self.graph.game_handle()?;
        ObjectRef::resolve(&self.graph, handle).ok()
    }

    /// Every live and placeholder object, in creation order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectRef<'_>> {
        self.graph
            .object_map()
            .iter()
            .filter(|(_, record)| record.is_present())
            .filter_map(|(handle, _)| ObjectRef::resolve(&self.graph, handle).ok())
    }

    /// Objects of type `tag` or any of its subtypes, in creation order.
    pub fn objects_of_type<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ObjectRef<'a>> + 'a {
        self.objects().filter(move |object| object.is_kind_of(tag))
    }

    /// Objects created by forward references and not yet populated.
    pub fn placeholders(&self) -> impl Iterator<Item = ObjectRef<'_>> {
        self.graph
            .object_map()
            .iter()
            .filter(|(_, record)| record.state() == ObjectState::Placeholder)
            .filter_map(|(handle, _)| ObjectRef::resolve(&self.graph, handle).ok())
    }

    /// Number of live and placeholder objects.
    pub fn len(&self) -> usize {
        self.graph
            .object_map()
            .iter()
            .filter(|(_, record)| record.is_present())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn delta_index(&self) -> DeltaIndex {
        self.graph.delta_index()
    }

    pub fn kinds(&self) -> &ObjectKinds {
        self.graph.kinds()
    }

    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    /// Whether both views pin the same published snapshot.
    pub fn same_snapshot(&self, other: &GraphView) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph)
    }
}
