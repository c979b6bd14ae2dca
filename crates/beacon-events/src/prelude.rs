//! Prelude module - commonly used types for convenient import.
//!
//! Use `use beacon_events::prelude::*;` to import all essential types.

// Registry
pub use crate::{DispatchReport, EventRegistry, RegistryConfig};

// Events
pub use crate::{Entity, EntityId, Event, Value};

// Listeners
pub use crate::{ListenerHandle, ListenerId, ListenerSpec};

// Runtime seams
pub use crate::{BoxError, DispatchError, ErrorReporter, IdentityConverter, Invocable, ValueConverter};
