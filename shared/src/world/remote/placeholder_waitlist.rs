use std::collections::{HashMap, VecDeque};

use crate::{types::DeltaIndex, world::object::object_handle::ObjectHandle};

/// Tracks placeholders until their own create instruction arrives.
///
/// Each placeholder gets a time-to-live counted in deltas. One that outlives
/// it means the server referenced an object it never described.
#[derive(Clone, Debug)]
pub struct PlaceholderWaitlist {
    waiting: HashMap<ObjectHandle, DeltaIndex>,
    ttl_queue: VecDeque<(DeltaIndex, ObjectHandle)>,
    ttl: u32,
}

impl PlaceholderWaitlist {
    pub fn new(ttl: u32) -> Self {
        Self {
            waiting: HashMap::new(),
            ttl_queue: VecDeque::new(),
            ttl: ttl.max(1),
        }
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn queue(&mut self, handle: ObjectHandle, created: DeltaIndex) {
        if self.waiting.insert(handle, created).is_none() {
            self.ttl_queue.push_back((created, handle));
        }
    }

    /// Stops tracking a placeholder, because it was populated or removed.
    pub fn complete(&mut self, handle: ObjectHandle) -> bool {
        self.waiting.remove(&handle).is_some()
    }

    pub fn is_waiting(&self, handle: ObjectHandle) -> bool {
        self.waiting.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn clear(&mut self) {
        self.waiting.clear();
        self.ttl_queue.clear();
    }

    /// Returns the oldest placeholder still waiting once delta `now` has been
    /// applied, if it has used up its time-to-live.
    pub fn check_expired(&mut self, now: DeltaIndex) -> Option<(ObjectHandle, DeltaIndex)> {
        loop {
            let (created, handle) = *self.ttl_queue.front()?;
            if self.waiting.get(&handle) != Some(&created) {
                // completed earlier
                self.ttl_queue.pop_front();
                continue;
            }
            let age = now.saturating_sub(created) + 1;
            if age >= u64::from(self.ttl) {
                return Some((handle, created));
            }
            return None;
        }
    }
}
