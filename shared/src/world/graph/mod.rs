pub mod graph_view;
pub mod object_graph;
pub mod object_ref;
pub mod snapshot;
