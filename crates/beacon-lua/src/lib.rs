//! Beacon Lua - script bindings for the event registry.
//!
//! [`ScriptEvents`] ties a Lua state to an
//! [`EventRegistry`](beacon_events::EventRegistry) and exposes an `events`
//! table to scripts:
//!
//! ```rust
//! use beacon_events::{EntityId, Event};
//! use beacon_lua::ScriptEvents;
//!
//! let events = ScriptEvents::new(mlua::Lua::new());
//! events.install().unwrap();
//! events.exec(r#"
//!     hits = 0
//!     events.listen("hit", 5, function(damage) hits = hits + damage end)
//! "#, "example").unwrap();
//!
//! events.dispatch(&Event::new("hit", &EntityId::new(5)).with_argument(10));
//! assert_eq!(events.lua().globals().get::<i64>("hits").unwrap(), 10);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod convert;
mod error;
mod script;

pub use convert::{LuaCallback, LuaConverter};
pub use error::{LuaError, LuaResult};
pub use script::ScriptEvents;
