use std::fmt;

use serde_json::Value;

/// Identifier assigned to a game object by the game server.
///
/// Identifiers arrive either as strings or as integers. Both normalize to the
/// same canonical string, so `7` and `"7"` name the same object.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(value) if !value.is_empty() => Some(Self(value.clone())),
            Value::Number(number) if number.is_u64() || number.is_i64() => {
                Some(Self(number.to_string()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ObjectId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}
