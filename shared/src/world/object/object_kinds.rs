use std::collections::HashMap;

use crate::{
    protocol::ProtocolError,
    world::object::object_shape::{FieldKind, ObjectShape},
};

/// Game-type registry: maps a wire type tag to the shape instantiated for it.
///
/// Populated once while building the [`Protocol`](crate::Protocol), then shared
/// read-only by every delta the session applies.
#[derive(Clone, Debug)]
pub struct ObjectKinds {
    shapes: HashMap<String, ObjectShape>,
}

impl Default for ObjectKinds {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectKinds {
    pub fn new() -> Self {
        let mut shapes = HashMap::new();
        let base = ObjectShape::base();
        shapes.insert(base.tag().to_string(), base);
        Self { shapes }
    }

    /// Registers a shape. A later registration under the same tag replaces the earlier one.
    pub fn add_shape(&mut self, shape: ObjectShape) {
        self.shapes.insert(shape.tag().to_string(), shape);
    }

    pub fn resolve_type(&self, tag: &str) -> Result<&ObjectShape, ProtocolError> {
        self.shapes
            .get(tag)
            .ok_or_else(|| ProtocolError::TypeNotRegistered {
                tag: tag.to_string(),
            })
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.shapes.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(|tag| tag.as_str())
    }

    /// Looks a field up on the shape for `tag`, walking the parent chain.
    pub fn field_kind(&self, tag: &str, field: &str) -> Option<&FieldKind> {
        let mut current = self.shapes.get(tag);
        let mut depth = 0;
        while let Some(shape) = current {
            if let Some(kind) = shape.own_field(field) {
                return Some(kind);
            }
            depth += 1;
            if depth > self.shapes.len() {
                // parent cycle
                return None;
            }
            current = shape.parent().and_then(|parent| self.shapes.get(parent));
        }
        None
    }

    /// Whether `tag` is `ancestor` or one of its subtypes.
    pub fn is_kind_of(&self, tag: &str, ancestor: &str) -> bool {
        let mut current = Some(tag);
        let mut depth = 0;
        while let Some(tag) = current {
            if tag == ancestor {
                return true;
            }
            depth += 1;
            if depth > self.shapes.len() {
                return false;
            }
            current = self.shapes.get(tag).and_then(|shape| shape.parent());
        }
        false
    }

    /// Whether two tags lie on one inheritance line, in either direction.
    pub fn are_related(&self, a: &str, b: &str) -> bool {
        self.is_kind_of(a, b) || self.is_kind_of(b, a)
    }

    /// Picks the more specific of two related tags.
    pub fn narrowest<'a>(&self, a: &'a str, b: &'a str) -> &'a str {
        if self.is_kind_of(a, b) {
            a
        } else {
            b
        }
    }

    /// Verifies every parent is registered and no shape inherits from itself.
    pub(crate) fn check_hierarchy(&self) -> Result<(), ProtocolError> {
        for shape in self.shapes.values() {
            let Some(parent) = shape.parent() else {
                continue;
            };
            if !self.shapes.contains_key(parent) {
                return Err(ProtocolError::ParentNotRegistered {
                    tag: shape.tag().to_string(),
                    parent: parent.to_string(),
                });
            }
            let mut seen = 0;
            let mut current = Some(parent);
            while let Some(tag) = current {
                if tag == shape.tag() || seen > self.shapes.len() {
                    return Err(ProtocolError::InheritanceCycle {
                        tag: shape.tag().to_string(),
                    });
                }
                seen += 1;
                current = self.shapes.get(tag).and_then(|shape| shape.parent());
            }
        }
        Ok(())
    }

    /// Verifies every typed reference, at any nesting depth, targets a registered tag.
    pub(crate) fn check_references(&self) -> Result<(), ProtocolError> {
        for shape in self.shapes.values() {
            for (field, kind) in shape.own_fields() {
                if let Some(target) = self.unregistered_target(kind) {
                    return Err(ProtocolError::ReferenceTargetNotRegistered {
                        tag: shape.tag().to_string(),
                        field: field.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn unregistered_target<'k>(&self, kind: &'k FieldKind) -> Option<&'k str> {
        match kind {
            FieldKind::Ref(Some(target)) if !self.shapes.contains_key(target) => Some(target),
            FieldKind::List(inner) | FieldKind::Map(inner) => self.unregistered_target(inner),
            FieldKind::Record(fields) => fields
                .values()
                .find_map(|inner| self.unregistered_target(inner)),
            _ => None,
        }
    }
}
