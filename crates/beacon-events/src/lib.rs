//! Beacon Events - entity-scoped event listeners with synchronous dispatch.
//!
//! This crate provides:
//! - [`Event`] values naming an event, the entity it happened to, and its arguments
//! - [`EventRegistry`] holding listeners and delivering events to them
//! - [`ListenerHandle`] values for cancelling a registration later
//! - Narrow seams ([`Invocable`], [`ValueConverter`], [`Entity`],
//!   [`ErrorReporter`]) to the embedding scripting runtime
//!
//! # Dispatch semantics
//!
//! A listener matches when both the event name and the entity id are equal
//! to the dispatched event's. Matching listeners are called in registration
//! order with one shared, converted argument list. Volatile listeners are
//! removed before their single invocation. Callbacks may remove themselves
//! or any other listener mid-dispatch; removed listeners that were not yet
//! visited are skipped. A failing or panicking callback is reported and the
//! remaining listeners still run.
//!
//! # Example
//!
//! ```rust
//! use beacon_events::{BoxError, EntityId, Event, EventRegistry, IdentityConverter, Value};
//!
//! let registry = EventRegistry::new(IdentityConverter);
//! let player = EntityId::new(5);
//!
//! let handle = registry.listen("spawn", &player, |args: &[Value]| -> Result<(), BoxError> {
//!     assert_eq!(args, &[Value::from("rifle")]);
//!     Ok(())
//! });
//!
//! let report = registry.dispatch(&Event::new("spawn", &player).with_argument("rifle"));
//! assert_eq!(report.invoked, 1);
//!
//! handle.clear(&registry);
//! assert!(registry.is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod entity;
mod error;
mod event;
mod invoke;
mod listener;
mod registry;
mod reporter;
mod value;

pub use config::RegistryConfig;
pub use entity::{Entity, EntityId};
pub use error::DispatchError;
pub use event::Event;
pub use invoke::{BoxError, IdentityConverter, Invocable, ValueConverter};
pub use listener::{ListenerHandle, ListenerId, ListenerSpec};
pub use registry::{DispatchReport, EventRegistry};
pub use reporter::{ErrorReporter, TracingReporter};
pub use value::Value;
