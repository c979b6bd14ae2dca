//! Error types for the Lua bindings.

use beacon_events::EntityId;
use thiserror::Error;

/// Errors raised while bridging the registry and a Lua state.
#[derive(Debug, Error)]
pub enum LuaError {
    /// Lua runtime error.
    #[error("lua error: {0}")]
    Runtime(#[from] mlua::Error),

    /// Entity id does not fit a Lua integer.
    #[error("entity id out of range for lua: {0}")]
    EntityOutOfRange(EntityId),
}

/// Result type for Lua binding operations.
pub type LuaResult<T> = Result<T, LuaError>;
