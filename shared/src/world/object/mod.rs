pub mod field_value;
pub mod game_object;
pub mod object_handle;
pub mod object_id;
pub mod object_kinds;
pub mod object_map;
pub mod object_shape;
