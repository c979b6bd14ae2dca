//! Entity identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a game entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw entity number.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw entity number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Anything that can name the entity an event belongs to.
///
/// The entity system implements this for its own entity references; the
/// registry only ever looks at the returned identifier.
pub trait Entity {
    /// Identifier used to match listeners.
    fn entity_id(&self) -> EntityId;
}

impl Entity for EntityId {
    fn entity_id(&self) -> EntityId {
        *self
    }
}

impl<T: Entity + ?Sized> Entity for &T {
    fn entity_id(&self) -> EntityId {
        (**self).entity_id()
    }
}
