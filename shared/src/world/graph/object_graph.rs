use std::sync::Arc;

use crate::{
    types::DeltaIndex,
    world::object::{
        game_object::GameObject, object_handle::ObjectHandle, object_kinds::ObjectKinds,
        object_map::ObjectMap,
    },
};

/// Every object of one session, arena-indexed by [`ObjectHandle`].
///
/// Objects are shared between consecutive snapshots and copied on write, so
/// cloning a graph to apply the next delta only copies the registry and the
/// handle table.
#[derive(Clone, Debug)]
pub struct ObjectGraph {
    kinds: Arc<ObjectKinds>,
    object_map: ObjectMap,
    objects: Vec<Option<Arc<GameObject>>>,
    game: Option<ObjectHandle>,
    delta_index: DeltaIndex,
}

impl ObjectGraph {
    pub fn new(kinds: Arc<ObjectKinds>) -> Self {
        Self {
            kinds,
            object_map: ObjectMap::new(),
            objects: Vec::new(),
            game: None,
            delta_index: 0,
        }
    }

    pub fn kinds(&self) -> &ObjectKinds {
        &self.kinds
    }

    pub fn object_map(&self) -> &ObjectMap {
        &self.object_map
    }

    /// Index of the last delta applied to this graph, 0 before the first one.
    pub fn delta_index(&self) -> DeltaIndex {
        self.delta_index
    }

    pub fn game_handle(&self) -> Option<ObjectHandle> {
        self.game
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&GameObject> {
        self.objects.get(handle.index())?.as_deref()
    }

    pub(crate) fn split_mut(&mut self) -> (&ObjectKinds, &mut ObjectMap) {
        (&self.kinds, &mut self.object_map)
    }

    pub(crate) fn set_delta_index(&mut self, delta_index: DeltaIndex) {
        self.delta_index = delta_index;
    }

    pub(crate) fn set_game(&mut self, handle: ObjectHandle) {
        self.game = Some(handle);
    }

    /// Makes sure an object body exists for every allocated handle.
    pub(crate) fn ensure_object(&mut self, handle: ObjectHandle) {
        if self.objects.len() <= handle.index() {
            self.objects.resize(handle.index() + 1, None);
        }
        if self.objects[handle.index()].is_some() {
            return;
        }
        if let Some(record) = self.object_map.record(handle) {
            if record.is_present() {
                self.objects[handle.index()] = Some(Arc::new(GameObject::new(record.id().clone())));
            }
        }
    }

    /// Mutable access for the applier. Copies the object if an older snapshot still shares it.
    pub(crate) fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut GameObject> {
        self.ensure_object(handle);
        self.objects
            .get_mut(handle.index())?
            .as_mut()
            .map(Arc::make_mut)
    }

    pub(crate) fn remove_object(&mut self, handle: ObjectHandle) {
        if let Some(slot) = self.objects.get_mut(handle.index()) {
            *slot = None;
        }
        if self.game == Some(handle) {
            self.game = None;
        }
    }
}
