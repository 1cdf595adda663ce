use serde_json::{json, Map, Value};

/// A reference marker pointing at `id`.
pub fn reference(id: &str) -> Value {
    json!({ "id": id })
}

/// Builds delta messages in the server's wire format.
#[derive(Default)]
pub struct DeltaBuilder {
    game_objects: Map<String, Value>,
    deleted: Vec<Value>,
    game: Map<String, Value>,
}

impl DeltaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// First appearance of `id`, carrying its type tag.
    pub fn create(mut self, id: &str, tag: &str, fields: Value) -> Self {
        let mut entry = Map::new();
        entry.insert("gameObjectName".to_string(), Value::String(tag.to_string()));
        if let Value::Object(fields) = fields {
            entry.extend(fields);
        }
        self.game_objects.insert(id.to_string(), Value::Object(entry));
        self
    }

    /// Changed fields of an object the client already knows.
    pub fn update(mut self, id: &str, fields: Value) -> Self {
        self.game_objects.insert(id.to_string(), fields);
        self
    }

    /// Deletion through the `"&RM"` marker in `gameObjects`.
    pub fn remove(mut self, id: &str) -> Self {
        self.game_objects
            .insert(id.to_string(), Value::String("&RM".to_string()));
        self
    }

    /// Deletion through the top-level `deleted` list.
    pub fn delete(mut self, id: &str) -> Self {
        self.deleted.push(Value::String(id.to_string()));
        self
    }

    /// Top-level fields of the game singleton.
    pub fn game(mut self, fields: Value) -> Self {
        if let Value::Object(fields) = fields {
            self.game.extend(fields);
        }
        self
    }

    pub fn build(self) -> Value {
        let mut message = Map::new();
        if !self.game_objects.is_empty() {
            message.insert("gameObjects".to_string(), Value::Object(self.game_objects));
        }
        if !self.deleted.is_empty() {
            message.insert("deleted".to_string(), Value::Array(self.deleted));
        }
        message.extend(self.game);
        Value::Object(message)
    }

    pub fn to_message(self) -> String {
        self.build().to_string()
    }
}
