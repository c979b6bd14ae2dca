//! Beacon Test - shared test utilities for Beacon crates.
//!
//! Mock callbacks, reporters and converters plus fixtures for common
//! events. Intended as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! beacon-test.workspace = true
//! ```
//!
//! ```rust
//! use beacon_events::EventRegistry;
//! use beacon_test::{CountingConverter, RecordingCallback, hit_event, test_player};
//!
//! let registry = EventRegistry::new(CountingConverter::new());
//! let callback = RecordingCallback::new();
//! registry.listen("hit", &test_player(), callback.clone());
//!
//! registry.dispatch(&hit_event(test_player(), 10));
//! assert_eq!(callback.call_count(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
