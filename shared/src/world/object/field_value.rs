use std::collections::BTreeMap;

use super::object_handle::ObjectHandle;

/// A committed field value on a game object.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FieldValue>),
    Record(BTreeMap<String, FieldValue>),
    Ref(ObjectHandle),
}

impl FieldValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::List(_) => "list",
            FieldValue::Record(_) => "record",
            FieldValue::Ref(_) => "reference",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers widen to floats, matching how numbers arrive on the wire.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => Some(*value),
            FieldValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Record(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_ref_handle(&self) -> Option<ObjectHandle> {
        match self {
            FieldValue::Ref(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Visits every reference held by this value, including inside lists and records.
    pub fn for_each_ref(&self, visit: &mut dyn FnMut(ObjectHandle)) {
        match self {
            FieldValue::Ref(handle) => visit(*handle),
            FieldValue::List(values) => {
                for value in values {
                    value.for_each_ref(visit);
                }
            }
            FieldValue::Record(entries) => {
                for value in entries.values() {
                    value.for_each_ref(visit);
                }
            }
            _ => {}
        }
    }
}
