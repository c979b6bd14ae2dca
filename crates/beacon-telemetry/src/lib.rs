//! Beacon Telemetry - logging for hosts embedding a Beacon event registry.
//!
//! The registry itself only emits `tracing` events. This crate installs a
//! global subscriber for them, configured by [`LogConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use beacon_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), beacon_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("beacon_events=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("Logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
