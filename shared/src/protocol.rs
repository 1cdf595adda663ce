use crate::world::object::{object_kinds::ObjectKinds, object_shape::ObjectShape};

pub mod error;
pub use error::ProtocolError;

// Protocol Plugin
pub trait ProtocolPlugin {
    fn build(&self, protocol: &mut Protocol);
}

// Protocol
/// The set of object types a session understands, fixed once locked.
pub struct Protocol {
    pub object_kinds: ObjectKinds,
    /// Type tag of the game singleton, whose fields travel at the top level of each delta
    pub game_type: Option<String>,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            object_kinds: ObjectKinds::new(),
            game_type: None,
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    pub fn add_type(&mut self, shape: ObjectShape) -> &mut Self {
        self.check_lock();
        self.object_kinds.add_shape(shape);
        self
    }

    pub fn game_type(&mut self, tag: &str) -> &mut Self {
        self.check_lock();
        self.game_type = Some(tag.to_string());
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_add_type(&mut self, shape: ObjectShape) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.object_kinds.add_shape(shape);
        Ok(self)
    }

    pub fn try_game_type(&mut self, tag: &str) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.game_type = Some(tag.to_string());
        Ok(self)
    }

    /// Validates the registered types and forbids further changes.
    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.object_kinds.check_hierarchy()?;
        self.object_kinds.check_references()?;
        if let Some(game_type) = &self.game_type {
            self.object_kinds.resolve_type(game_type)?;
        }
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        if let Err(err) = self.try_lock() {
            panic!("{}", err);
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Checks if protocol is locked without panicking
    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }
}
