use std::collections::BTreeMap;

use crate::constants::GAME_OBJECT_TAG;

/// The declared kind of one field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    /// Accepts any value, classified structurally.
    Any,
    Bool,
    Int,
    Float,
    Str,
    /// Reference to another game object, optionally constrained to a type tag
    /// (or any of its subtypes).
    Ref(Option<String>),
    List(Box<FieldKind>),
    /// Dictionary with arbitrary string keys.
    Map(Box<FieldKind>),
    /// Nested record with a fixed set of declared fields.
    Record(BTreeMap<String, FieldKind>),
}

impl FieldKind {
    pub fn reference(tag: &str) -> Self {
        FieldKind::Ref(Some(tag.to_string()))
    }

    pub fn list_of(kind: FieldKind) -> Self {
        FieldKind::List(Box::new(kind))
    }

    pub fn map_of(kind: FieldKind) -> Self {
        FieldKind::Map(Box::new(kind))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Any => "any",
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Str => "string",
            FieldKind::Ref(_) => "reference",
            FieldKind::List(_) => "list",
            FieldKind::Map(_) => "map",
            FieldKind::Record(_) => "record",
        }
    }
}

/// The shape instantiated for one wire type tag.
///
/// Fields are inherited along the parent chain, so a `Piece` shape that
/// extends `GameObject` also accepts `id` and `gameObjectName`.
#[derive(Clone, Debug)]
pub struct ObjectShape {
    tag: String,
    parent: Option<String>,
    fields: BTreeMap<String, FieldKind>,
}

impl ObjectShape {
    /// A root shape with no parent.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            fields: BTreeMap::new(),
        }
    }

    /// A shape extending the `GameObject` base shape.
    pub fn game_object(tag: &str) -> Self {
        Self::new(tag).extends(GAME_OBJECT_TAG)
    }

    pub(crate) fn base() -> Self {
        use crate::constants::{ID_FIELD, TYPE_TAG_FIELD};

        Self::new(GAME_OBJECT_TAG)
            .field(ID_FIELD, FieldKind::Str)
            .field(TYPE_TAG_FIELD, FieldKind::Str)
            .field("logs", FieldKind::list_of(FieldKind::Str))
    }

    pub fn extends(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.insert(name.to_string(), kind);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Fields declared directly on this shape, not including inherited ones.
    pub fn own_fields(&self) -> impl Iterator<Item = (&str, &FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), kind))
    }

    pub(crate) fn own_field(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }
}
