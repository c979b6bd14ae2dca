//! Events published through the registry.

use crate::entity::{Entity, EntityId};
use crate::value::Value;

/// A single occurrence of a named event on an entity.
///
/// Events are transient: the publisher builds one, hands it to
/// [`EventRegistry::dispatch`](crate::EventRegistry::dispatch) and drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event name, matched exactly against listener registrations.
    pub name: String,
    /// Entity the event originated from.
    pub entity: EntityId,
    /// Ordered arguments handed to every listener.
    pub arguments: Vec<Value>,
}

impl Event {
    /// Create an event without arguments.
    pub fn new(name: impl Into<String>, entity: &impl Entity) -> Self {
        Self {
            name: name.into(),
            entity: entity.entity_id(),
            arguments: Vec::new(),
        }
    }

    /// Append a single argument.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<Value>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Append several arguments in order.
    #[must_use]
    pub fn with_arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }
}
