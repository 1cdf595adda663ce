use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::world::graph::{graph_view::GraphView, object_graph::ObjectGraph};

/// Publishes fully applied graphs to readers.
///
/// The applier builds each new graph privately and publishes it with a single
/// atomic pointer swap, so a reader sees either the previous complete state or
/// the next one.
pub struct Snapshot {
    current: Arc<ArcSwap<ObjectGraph>>,
}

impl Snapshot {
    pub fn new(graph: ObjectGraph) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(graph)),
        }
    }

    pub fn current_graph(&self) -> GraphView {
        GraphView::new(self.current.load_full())
    }

    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            current: self.current.clone(),
        }
    }

    pub(crate) fn publish(&self, graph: ObjectGraph) {
        self.current.store(Arc::new(graph));
    }
}

/// Cloneable read handle to a [`Snapshot`], usable from other threads.
#[derive(Clone)]
pub struct SnapshotReader {
    current: Arc<ArcSwap<ObjectGraph>>,
}

impl SnapshotReader {
    pub fn current_graph(&self) -> GraphView {
        GraphView::new(self.current.load_full())
    }
}
