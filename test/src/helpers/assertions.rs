use joueur_shared::{FieldValue, GraphView, ObjectHandle, ObjectState};

/// Lists every `object.field` holding a reference the registry does not know,
/// or one whose record maps its identifier to a different handle.
///
/// References to placeholders and to removed objects count as known.
pub fn dangling_references(graph: &GraphView) -> Vec<String> {
    let mut dangling = Vec::new();
    for object in graph.objects() {
        for (name, value) in object.object().fields() {
            let mut check = |handle: ObjectHandle| {
                if !is_registered(graph, handle) {
                    dangling.push(format!("{}.{}", object.id(), name));
                }
            };
            value.for_each_ref(&mut check);
        }
    }
    dangling
}

/// Whether `handle` belongs to this graph's registry: its record exists and
/// the record's identifier maps back to the same handle.
pub fn is_registered(graph: &GraphView, handle: ObjectHandle) -> bool {
    let object_map = graph.graph().object_map();
    object_map
        .record(handle)
        .is_some_and(|record| object_map.handle(record.id()) == Some(handle))
}

/// Whether the object behind `handle` can be read, i.e. is not tombstoned.
pub fn is_readable(graph: &GraphView, handle: ObjectHandle) -> bool {
    graph
        .graph()
        .object_map()
        .record(handle)
        .map_or(false, |record| record.state() != ObjectState::Removed)
}

/// Every present object's fields, keyed by identifier, for comparing two graphs.
pub fn field_dump(graph: &GraphView) -> Vec<(String, Vec<(String, FieldValue)>)> {
    graph
        .objects()
        .map(|object| {
            let fields = object
                .object()
                .fields()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect();
            (object.id().to_string(), fields)
        })
        .collect()
}

/// Assert that every reference in the graph names a registered object
#[macro_export]
macro_rules! assert_references_resolve {
    ($graph:expr) => {
        let dangling = $crate::helpers::dangling_references(&$graph);
        assert!(
            dangling.is_empty(),
            "References to unknown objects: {:?}",
            dangling
        );
    };
}
