use log::{debug, warn};
use serde_json::{Map, Value};

use crate::{
    constants::{
        DEFAULT_MAX_LIST_LEN, DELETED_KEY, GAME_ID, GAME_OBJECTS_KEY, GAME_OBJECT_TAG, ID_FIELD,
        LIST_LENGTH_MARKER, REMOVED_MARKER, TYPE_TAG_FIELD,
    },
    types::InstructionIndex,
    world::{
        object::{
            object_id::ObjectId, object_kinds::ObjectKinds, object_map::ObjectMap,
            object_shape::FieldKind,
        },
        remote::{
            error::{DecodeLocation, SyncError},
            instruction::{FieldUpdate, Instruction, RawValue},
        },
    },
};

/// Output of decoding one delta message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedDelta {
    /// Deletions first, then creations and updates in wire order
    pub instructions: Vec<Instruction>,
    /// Instructions dropped because their type tag is not registered
    pub skipped: Vec<SyncError>,
}

/// Turns one delta message into an ordered list of [`Instruction`]s.
///
/// Decoding is syntactic: field values are checked against the declared shape
/// and classified, but references are left as identifiers. The registry is
/// only consulted to learn the type of objects that already exist.
pub struct DeltaDecoder<'a> {
    kinds: &'a ObjectKinds,
    game_type: Option<&'a str>,
    object_map: &'a ObjectMap,
    max_list_len: usize,
    skipped: Vec<SyncError>,
}

impl<'a> DeltaDecoder<'a> {
    pub fn new(kinds: &'a ObjectKinds, game_type: Option<&'a str>, object_map: &'a ObjectMap) -> Self {
        Self {
            kinds,
            game_type,
            object_map,
            max_list_len: DEFAULT_MAX_LIST_LEN,
            skipped: Vec::new(),
        }
    }

    /// Sets the largest length a list delta may declare.
    pub fn with_max_list_len(mut self, max_list_len: usize) -> Self {
        self.max_list_len = max_list_len;
        self
    }

    pub fn decode(mut self, raw: &Value) -> Result<DecodedDelta, SyncError> {
        let Value::Object(message) = raw else {
            return Err(SyncError::decode(
                format!("delta must be a JSON object, found {}", json_kind(raw)),
                DecodeLocation::message(),
            ));
        };

        let game_objects = match message.get(GAME_OBJECTS_KEY) {
            None => None,
            Some(Value::Object(game_objects)) => Some(game_objects),
            Some(other) => {
                return Err(SyncError::decode(
                    format!("`{}` must be an object, found {}", GAME_OBJECTS_KEY, json_kind(other)),
                    DecodeLocation::message(),
                ));
            }
        };

        // Deletions

        let mut instructions = Vec::new();
        if let Some(deleted) = message.get(DELETED_KEY) {
            let Value::Array(deleted) = deleted else {
                return Err(SyncError::decode(
                    format!("`{}` must be a list of identifiers", DELETED_KEY),
                    DecodeLocation::message(),
                ));
            };
            for raw_id in deleted {
                let index = instructions.len();
                let id = ObjectId::from_json(raw_id).ok_or_else(|| {
                    SyncError::decode(
                        format!("invalid identifier {} in `{}`", raw_id, DELETED_KEY),
                        DecodeLocation::message().at(index),
                    )
                })?;
                instructions.push(Instruction::Delete { index, id });
            }
        }
        if let Some(game_objects) = game_objects {
            for (key, value) in game_objects {
                if value.as_str() == Some(REMOVED_MARKER) {
                    let index = instructions.len();
                    let id = self.object_key(key, index)?;
                    instructions.push(Instruction::Delete { index, id });
                }
            }
        }

        // Creations and updates

        if let Some(game_objects) = game_objects {
            for (key, value) in game_objects {
                if value.as_str() == Some(REMOVED_MARKER) {
                    continue;
                }
                let index = instructions.len();
                let id = self.object_key(key, index)?;
                if let Some(instruction) = self.decode_object(index, id, value)? {
                    instructions.push(instruction);
                }
            }
        }

        let game_fields: Map<String, Value> = message
            .iter()
            .filter(|(key, _)| key.as_str() != GAME_OBJECTS_KEY && key.as_str() != DELETED_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !game_fields.is_empty() {
            let index = instructions.len();
            let Some(game_type) = self.game_type else {
                let key = game_fields.keys().next().cloned().unwrap_or_default();
                return Err(SyncError::decode(
                    format!("unexpected top-level key `{}` and no game type is configured", key),
                    DecodeLocation::message(),
                ));
            };
            let id = ObjectId::from(GAME_ID);
            let fields = self.decode_fields(index, &id, game_type, &game_fields)?;
            instructions.push(Instruction::CreateOrUpdate {
                index,
                id,
                type_tag: game_type.to_string(),
                fields,
            });
        }

        debug!(
            "Decoded delta into {} instructions, {} skipped",
            instructions.len(),
            self.skipped.len()
        );

        Ok(DecodedDelta {
            instructions,
            skipped: self.skipped,
        })
    }

    fn object_key(&self, key: &str, index: InstructionIndex) -> Result<ObjectId, SyncError> {
        if key.is_empty() {
            return Err(SyncError::decode(
                "empty object identifier",
                DecodeLocation::message().at(index),
            ));
        }
        let id = ObjectId::from(key);
        if self.game_type.is_some() && key == GAME_ID {
            return Err(SyncError::decode(
                format!("identifier `{}` is reserved for the game object", GAME_ID),
                DecodeLocation::object(&id).at(index),
            ));
        }
        Ok(id)
    }

    /// Returns `Ok(None)` when the instruction is skipped for an unknown type.
    fn decode_object(
        &mut self,
        index: InstructionIndex,
        id: ObjectId,
        value: &Value,
    ) -> Result<Option<Instruction>, SyncError> {
        let location = DecodeLocation::object(&id).at(index);
        let Value::Object(fields) = value else {
            return Err(SyncError::decode(
                format!("object entry must be a field map or \"{}\"", REMOVED_MARKER),
                location,
            ));
        };

        if let Some(raw_id) = fields.get(ID_FIELD) {
            if ObjectId::from_json(raw_id).as_ref() != Some(&id) {
                return Err(SyncError::decode(
                    format!("`{}` field {} does not match its key", ID_FIELD, raw_id),
                    location.field(ID_FIELD),
                ));
            }
        }

        let type_tag = match fields.get(TYPE_TAG_FIELD) {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => {
                return Err(SyncError::decode(
                    format!("type tag must be a string, found {}", json_kind(other)),
                    location.field(TYPE_TAG_FIELD),
                ));
            }
            None => self.known_type(&id).ok_or_else(|| {
                SyncError::decode(
                    format!("no `{}` given for an object never seen before", TYPE_TAG_FIELD),
                    location.clone(),
                )
            })?,
        };

        if let Err(err) = self.kinds.resolve_type(&type_tag) {
            if let Some(fatal) = self.retag_error(&id, &type_tag, index) {
                return Err(fatal);
            }
            warn!("Skipping instruction {} for object {}: {}", index, id, err);
            self.skipped.push(SyncError::UnknownType {
                id,
                tag: type_tag,
                index,
            });
            return Ok(None);
        }

        let fields = self.decode_fields(index, &id, &type_tag, fields)?;

        Ok(Some(Instruction::CreateOrUpdate {
            index,
            id,
            type_tag,
            fields,
        }))
    }

    /// An unregistered tag on an identifier the registry already knows is a
    /// type change, not an unknown object.
    fn retag_error(&self, id: &ObjectId, type_tag: &str, index: InstructionIndex) -> Option<SyncError> {
        let handle = self.object_map.handle(id)?;
        let record = self.object_map.record(handle)?;
        if !record.is_present() {
            return Some(SyncError::IdentifierReused {
                id: id.clone(),
                index,
            });
        }
        Some(SyncError::IdentifierConflict {
            id: id.clone(),
            existing: record.type_tag().unwrap_or(GAME_OBJECT_TAG).to_string(),
            incoming: type_tag.to_string(),
            index,
        })
    }

    fn known_type(&self, id: &ObjectId) -> Option<String> {
        let handle = self.object_map.handle(id)?;
        self.object_map
            .record(handle)?
            .type_tag()
            .map(str::to_string)
    }

    fn decode_fields(
        &self,
        index: InstructionIndex,
        id: &ObjectId,
        type_tag: &str,
        fields: &Map<String, Value>,
    ) -> Result<Vec<FieldUpdate>, SyncError> {
        let mut output = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            let location = DecodeLocation::object(id).at(index).field(name);
            let Some(kind) = self.kinds.field_kind(type_tag, name) else {
                return Err(SyncError::decode(
                    format!("field is not declared by type `{}`", type_tag),
                    location,
                ));
            };
            if name == ID_FIELD {
                // already checked against the key; stored in canonical form
                output.push(FieldUpdate {
                    name: name.clone(),
                    value: RawValue::Str(id.to_string()),
                });
                continue;
            }
            output.push(FieldUpdate {
                name: name.clone(),
                value: self.decode_value(value, kind, &location)?,
            });
        }
        Ok(output)
    }

    fn decode_value(
        &self,
        value: &Value,
        kind: &FieldKind,
        location: &DecodeLocation,
    ) -> Result<RawValue, SyncError> {
        if value.as_str() == Some(REMOVED_MARKER) {
            return Ok(RawValue::Removed);
        }
        if value.is_null() {
            return Ok(RawValue::Null);
        }

        let decoded = match kind {
            FieldKind::Any => Some(self.classify(value, location)?),
            FieldKind::Bool => value.as_bool().map(RawValue::Bool),
            FieldKind::Int => value.as_i64().map(RawValue::Int),
            FieldKind::Float => value.as_f64().map(RawValue::Float),
            FieldKind::Str => value.as_str().map(|value| RawValue::Str(value.to_string())),
            FieldKind::Ref(target) => reference_marker(value).map(|id| RawValue::Ref {
                id,
                target: target.clone(),
            }),
            FieldKind::List(element) => match value {
                Value::Array(items) => {
                    let mut output = Vec::with_capacity(items.len());
                    for item in items {
                        output.push(self.decode_value(item, element, location)?);
                    }
                    Some(RawValue::List(output))
                }
                Value::Object(entries) if entries.contains_key(LIST_LENGTH_MARKER) => {
                    Some(self.decode_list_delta(entries, element, location)?)
                }
                _ => None,
            },
            FieldKind::Map(element) => match value {
                Value::Object(entries) => {
                    let mut output = Vec::with_capacity(entries.len());
                    for (key, entry) in entries {
                        output.push((key.clone(), self.decode_value(entry, element, location)?));
                    }
                    Some(RawValue::Record(output))
                }
                _ => None,
            },
            FieldKind::Record(declared) => match value {
                Value::Object(entries) => {
                    let mut output = Vec::with_capacity(entries.len());
                    for (key, entry) in entries {
                        let Some(entry_kind) = declared.get(key) else {
                            return Err(SyncError::decode(
                                format!("nested field `{}` is not declared", key),
                                location.clone(),
                            ));
                        };
                        output.push((key.clone(), self.decode_value(entry, entry_kind, location)?));
                    }
                    Some(RawValue::Record(output))
                }
                _ => None,
            },
        };

        decoded.ok_or_else(|| {
            SyncError::decode(
                format!("expected {}, found {}", kind.name(), json_kind(value)),
                location.clone(),
            )
        })
    }

    fn decode_list_delta(
        &self,
        entries: &Map<String, Value>,
        element: &FieldKind,
        location: &DecodeLocation,
    ) -> Result<RawValue, SyncError> {
        let len = entries
            .get(LIST_LENGTH_MARKER)
            .and_then(Value::as_u64)
            .and_then(|len| usize::try_from(len).ok())
            .ok_or_else(|| {
                SyncError::decode(
                    format!("`{}` must be a non-negative integer", LIST_LENGTH_MARKER),
                    location.clone(),
                )
            })?;
        if len > self.max_list_len {
            return Err(SyncError::decode(
                format!(
                    "`{}` of {} exceeds the limit of {} entries",
                    LIST_LENGTH_MARKER, len, self.max_list_len
                ),
                location.clone(),
            ));
        }

        let mut output = Vec::with_capacity(entries.len().saturating_sub(1));
        for (key, entry) in entries {
            if key == LIST_LENGTH_MARKER {
                continue;
            }
            let position = key.parse::<usize>().ok().filter(|position| *position < len);
            let Some(position) = position else {
                return Err(SyncError::decode(
                    format!("list delta index `{}` is not an index below {}", key, len),
                    location.clone(),
                ));
            };
            output.push((position, self.decode_value(entry, element, location)?));
        }
        Ok(RawValue::ListDelta { len, entries: output })
    }

    /// Classifies a value of an undeclared kind by its structure alone.
    fn classify(&self, value: &Value, location: &DecodeLocation) -> Result<RawValue, SyncError> {
        Ok(match value {
            Value::Null => RawValue::Null,
            Value::Bool(value) => RawValue::Bool(*value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => RawValue::Int(value),
                None => RawValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(value) => RawValue::Str(value.clone()),
            Value::Array(_) => self.decode_value(value, &FieldKind::list_of(FieldKind::Any), location)?,
            Value::Object(entries) => {
                if let Some(id) = reference_marker(value) {
                    RawValue::Ref { id, target: None }
                } else if entries.contains_key(LIST_LENGTH_MARKER) {
                    self.decode_list_delta(entries, &FieldKind::Any, location)?
                } else {
                    self.decode_value(value, &FieldKind::map_of(FieldKind::Any), location)?
                }
            }
        })
    }
}

/// A reference marker is a single-key object naming the target identifier.
fn reference_marker(value: &Value) -> Option<ObjectId> {
    let Value::Object(entries) = value else {
        return None;
    };
    if entries.len() != 1 {
        return None;
    }
    ObjectId::from_json(entries.get(ID_FIELD)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
