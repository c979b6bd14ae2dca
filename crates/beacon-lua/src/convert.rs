//! Value conversion and callback wrapping for Lua.

use beacon_events::{BoxError, Invocable, Value, ValueConverter};
use mlua::{Function, Lua, Variadic};

use crate::error::LuaError;

/// Converts event arguments into Lua values owned by one Lua state.
#[derive(Clone)]
pub struct LuaConverter {
    lua: Lua,
}

impl std::fmt::Debug for LuaConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LuaConverter").finish_non_exhaustive()
    }
}

impl LuaConverter {
    /// Create a converter producing values for `lua`.
    #[must_use]
    pub fn new(lua: Lua) -> Self {
        Self { lua }
    }

    /// The Lua state values are created in.
    #[must_use]
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    fn to_lua(&self, value: &Value) -> Result<mlua::Value, LuaError> {
        let converted = match value {
            Value::Nil => mlua::Value::Nil,
            Value::Bool(b) => mlua::Value::Boolean(*b),
            Value::Integer(i) => mlua::Value::Integer(*i),
            Value::Float(f) => mlua::Value::Number(*f),
            Value::String(s) => mlua::Value::String(self.lua.create_string(s)?),
            Value::Vector([x, y, z]) => {
                let table = self.lua.create_table()?;
                table.set("x", *x)?;
                table.set("y", *y)?;
                table.set("z", *z)?;
                mlua::Value::Table(table)
            },
            Value::Entity(id) => {
                let raw = i64::try_from(id.get()).map_err(|_| LuaError::EntityOutOfRange(*id))?;
                mlua::Value::Integer(raw)
            },
            Value::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.to_lua(item))
                    .collect::<Result<Vec<_>, _>>()?;
                mlua::Value::Table(self.lua.create_sequence_from(items)?)
            },
        };
        Ok(converted)
    }
}

impl ValueConverter for LuaConverter {
    type Output = mlua::Value;

    fn convert(&self, value: &Value) -> Result<mlua::Value, BoxError> {
        Ok(self.to_lua(value)?)
    }
}

/// A Lua function registered as an event listener.
#[derive(Debug, Clone)]
pub struct LuaCallback(Function);

impl LuaCallback {
    /// Wrap a Lua function.
    #[must_use]
    pub fn new(function: Function) -> Self {
        Self(function)
    }
}

impl Invocable<mlua::Value> for LuaCallback {
    fn invoke(&self, arguments: &[mlua::Value]) -> Result<(), BoxError> {
        let arguments: Variadic<mlua::Value> = arguments.iter().cloned().collect();
        self.0
            .call::<()>(arguments)
            .map_err(|e| LuaError::from(e).into())
    }
}
