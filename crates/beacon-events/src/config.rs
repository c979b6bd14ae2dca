//! Registry tuning knobs.

use serde::{Deserialize, Serialize};

/// Configuration for an [`EventRegistry`](crate::EventRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Catch listener panics and report them instead of unwinding through dispatch.
    #[serde(default = "default_true")]
    pub catch_panics: bool,
    /// Listener slots reserved up front.
    #[serde(default)]
    pub initial_capacity: usize,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            catch_panics: true,
            initial_capacity: 0,
        }
    }
}

impl RegistryConfig {
    /// Let listener panics propagate out of dispatch.
    #[must_use]
    pub fn without_panic_isolation(mut self) -> Self {
        self.catch_panics = false;
        self
    }

    /// Reserve room for `capacity` listeners.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
