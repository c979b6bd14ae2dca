//! Listener registrations and the handles returned for them.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::invoke::{Invocable, ValueConverter};
use crate::registry::EventRegistry;

/// Registry-unique listener identifier.
///
/// Issued from a monotonically increasing counter and never reused within
/// one registry, even after the listener is gone.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cancellation capability for one registration.
///
/// A handle is a plain value carrying only the listener id. It stays valid
/// after the listener is gone; clearing it then does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerHandle {
    id: ListenerId,
}

impl ListenerHandle {
    pub(crate) const fn new(id: ListenerId) -> Self {
        Self { id }
    }

    /// Identifier of the listener this handle cancels.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener from `registry`.
    ///
    /// Returns `true` if it was still registered.
    pub fn clear<C: ValueConverter>(&self, registry: &EventRegistry<C>) -> bool {
        registry.remove(*self)
    }
}

/// Registration request for [`EventRegistry::register`].
pub struct ListenerSpec<V> {
    pub(crate) event: String,
    pub(crate) entity: EntityId,
    pub(crate) callback: Rc<dyn Invocable<V>>,
    pub(crate) volatile: bool,
}

impl<V> ListenerSpec<V> {
    /// A persistent listener for `event` on `entity`.
    pub fn new<F>(event: impl Into<String>, entity: &impl Entity, callback: F) -> Self
    where
        F: Invocable<V> + 'static,
    {
        Self::from_rc(event, entity, Rc::new(callback))
    }

    /// Same as [`ListenerSpec::new`] for an already shared callback.
    pub fn from_rc(
        event: impl Into<String>,
        entity: &impl Entity,
        callback: Rc<dyn Invocable<V>>,
    ) -> Self {
        Self {
            event: event.into(),
            entity: entity.entity_id(),
            callback,
            volatile: false,
        }
    }

    /// Make the listener one-shot: it is removed on its first matching delivery.
    #[must_use]
    pub fn volatile(mut self) -> Self {
        self.volatile = true;
        self
    }

    /// Event name this spec subscribes to.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Entity this spec subscribes to.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Whether the listener will be one-shot.
    #[must_use]
    pub fn is_volatile(&self) -> bool {
        self.volatile
    }
}

impl<V> fmt::Debug for ListenerSpec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSpec")
            .field("event", &self.event)
            .field("entity", &self.entity)
            .field("volatile", &self.volatile)
            .finish_non_exhaustive()
    }
}

/// A live registration, owned by the registry.
pub(crate) struct Listener<V> {
    pub(crate) id: ListenerId,
    pub(crate) event: String,
    pub(crate) entity: EntityId,
    pub(crate) callback: Rc<dyn Invocable<V>>,
    pub(crate) volatile: bool,
}

impl<V> Listener<V> {
    pub(crate) fn from_spec(id: ListenerId, spec: ListenerSpec<V>) -> Self {
        Self {
            id,
            event: spec.event,
            entity: spec.entity,
            callback: spec.callback,
            volatile: spec.volatile,
        }
    }

    pub(crate) fn matches(&self, event: &str, entity: EntityId) -> bool {
        self.entity == entity && self.event == event
    }
}
