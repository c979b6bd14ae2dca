//! Failures observed during dispatch.

use thiserror::Error;

use crate::entity::EntityId;
use crate::invoke::BoxError;
use crate::listener::ListenerId;

/// A failure caught inside [`EventRegistry::dispatch`](crate::EventRegistry::dispatch).
///
/// These never escape dispatch. They are handed to the registry's
/// [`ErrorReporter`](crate::ErrorReporter) and delivery carries on.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A listener callback returned an error.
    #[error("listener {listener} for '{event}' on {entity} failed: {source}")]
    Callback {
        /// Listener whose callback failed.
        listener: ListenerId,
        /// Event being delivered.
        event: String,
        /// Entity the event belongs to.
        entity: EntityId,
        /// The callback's error.
        #[source]
        source: BoxError,
    },

    /// A listener callback panicked.
    #[error("listener {listener} for '{event}' on {entity} panicked: {message}")]
    Panicked {
        /// Listener whose callback panicked.
        listener: ListenerId,
        /// Event being delivered.
        event: String,
        /// Entity the event belongs to.
        entity: EntityId,
        /// Panic payload, if it was a string.
        message: String,
    },

    /// An event argument could not be converted for the scripting runtime.
    #[error("argument {index} of '{event}' on {entity} could not be converted: {source}")]
    Conversion {
        /// Event being delivered.
        event: String,
        /// Entity the event belongs to.
        entity: EntityId,
        /// Position of the offending argument.
        index: usize,
        /// The converter's error.
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Listener the failure belongs to, if it came from a callback.
    #[must_use]
    pub fn listener(&self) -> Option<ListenerId> {
        match self {
            Self::Callback { listener, .. } | Self::Panicked { listener, .. } => Some(*listener),
            Self::Conversion { .. } => None,
        }
    }

    /// Name of the event that was being dispatched.
    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Self::Callback { event, .. }
            | Self::Panicked { event, .. }
            | Self::Conversion { event, .. } => event,
        }
    }

    /// Entity of the event that was being dispatched.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        match self {
            Self::Callback { entity, .. }
            | Self::Panicked { entity, .. }
            | Self::Conversion { entity, .. } => *entity,
        }
    }
}

/// Render a `catch_unwind` payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_callback() {
        let err = DispatchError::Callback {
            listener: ListenerId::new(4),
            event: "hit".into(),
            entity: EntityId::new(7),
            source: "out of ammo".into(),
        };
        assert_eq!(
            err.to_string(),
            "listener 4 for 'hit' on entity#7 failed: out of ammo"
        );
        assert_eq!(err.listener(), Some(ListenerId::new(4)));
    }

    #[test]
    fn display_conversion() {
        let err = DispatchError::Conversion {
            event: "spawn".into(),
            entity: EntityId::new(1),
            index: 2,
            source: "unsupported".into(),
        };
        assert_eq!(
            err.to_string(),
            "argument 2 of 'spawn' on entity#1 could not be converted: unsupported"
        );
        assert_eq!(err.listener(), None);
        assert_eq!(err.event(), "spawn");
        assert_eq!(err.entity(), EntityId::new(1));
    }

    #[test]
    fn panic_payloads() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(17_u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
