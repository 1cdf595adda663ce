pub mod config;
pub mod delta_decoder;
pub mod delta_report;
pub mod error;
pub mod instruction;
pub mod placeholder_waitlist;
pub mod reference_resolver;
pub mod remote_world_manager;
