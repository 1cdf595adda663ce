/// Arena index of an object inside one session's graph.
///
/// Handles are allocated the first time an identifier is seen and are never
/// recycled, so a handle stays meaningful after its object is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ObjectHandle(u32);

impl ObjectHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
