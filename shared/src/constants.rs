/// Tag of the base shape every synced game object extends.
pub const GAME_OBJECT_TAG: &str = "GameObject";

/// Field carrying an object's type tag.
pub const TYPE_TAG_FIELD: &str = "gameObjectName";

/// Field carrying an object's identifier. Also the single key of a reference marker.
pub const ID_FIELD: &str = "id";

/// Top-level key mapping identifiers to field updates.
pub const GAME_OBJECTS_KEY: &str = "gameObjects";

/// Optional top-level list of deleted identifiers.
pub const DELETED_KEY: &str = "deleted";

/// Value marking a removed object, field or record entry.
pub const REMOVED_MARKER: &str = "&RM";

/// Key holding the new length of a list sent as a delta.
pub const LIST_LENGTH_MARKER: &str = "&LEN";

/// Longest list a `&LEN` list delta may declare unless configured otherwise.
pub const DEFAULT_MAX_LIST_LEN: usize = 65_536;

/// Identifier under which the game singleton is stored.
pub const GAME_ID: &str = "game";
