pub mod graph;
pub mod object;
pub mod remote;
