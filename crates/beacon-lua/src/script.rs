//! The `events` global exposed to scripts.

use std::rc::{Rc, Weak};

use beacon_events::{
    DispatchReport, EntityId, ErrorReporter, Event, EventRegistry, ListenerHandle, ListenerSpec,
    RegistryConfig,
};
use mlua::{Function, Lua, UserData, UserDataFields, UserDataMethods};
use tracing::debug;

use crate::convert::{LuaCallback, LuaConverter};
use crate::error::LuaResult;

type Registry = EventRegistry<LuaConverter>;

/// A Lua state paired with the event registry its scripts listen on.
///
/// Script closures only hold weak references to the registry, so the
/// registry and the Lua state never keep each other alive. Dropping this
/// value clears every listener.
pub struct ScriptEvents {
    registry: Rc<Registry>,
    lua: Lua,
}

impl std::fmt::Debug for ScriptEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptEvents")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl ScriptEvents {
    /// Bind a fresh registry to `lua`.
    #[must_use]
    pub fn new(lua: Lua) -> Self {
        Self::with_config(lua, RegistryConfig::default())
    }

    /// Bind a registry with explicit configuration to `lua`.
    #[must_use]
    pub fn with_config(lua: Lua, config: RegistryConfig) -> Self {
        let registry = EventRegistry::with_config(LuaConverter::new(lua.clone()), config);
        Self::from_registry(lua, registry)
    }

    /// Bind a registry that sends failures to `reporter`.
    #[must_use]
    pub fn with_reporter(
        lua: Lua,
        config: RegistryConfig,
        reporter: impl ErrorReporter + 'static,
    ) -> Self {
        let registry =
            EventRegistry::with_config(LuaConverter::new(lua.clone()), config).with_reporter(reporter);
        Self::from_registry(lua, registry)
    }

    fn from_registry(lua: Lua, registry: Registry) -> Self {
        Self {
            registry: Rc::new(registry),
            lua,
        }
    }

    /// The Lua state.
    #[must_use]
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &EventRegistry<LuaConverter> {
        &self.registry
    }

    /// Publish the `events` global table.
    ///
    /// ```lua
    /// local h = events.listen("hit", player, function(damage) ... end)
    /// events.once("spawn", player, function(weapon) ... end)
    /// h:clear()
    /// events.clear()
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the Lua state rejects the table or functions.
    pub fn install(&self) -> LuaResult<()> {
        let table = self.lua.create_table()?;
        table.set("listen", self.listen_function(false)?)?;
        table.set("once", self.listen_function(true)?)?;

        let registry = Rc::downgrade(&self.registry);
        let clear = self.lua.create_function(move |_, ()| {
            if let Some(registry) = registry.upgrade() {
                registry.clear();
            }
            Ok(())
        })?;
        table.set("clear", clear)?;

        self.lua.globals().set("events", table)?;
        debug!("Installed events table");
        Ok(())
    }

    /// Run a chunk of script code.
    ///
    /// # Errors
    ///
    /// Returns the Lua error if the chunk fails to load or raises.
    pub fn exec(&self, source: &str, name: &str) -> LuaResult<()> {
        self.lua.load(source).set_name(name).exec()?;
        Ok(())
    }

    /// Deliver `event` to matching listeners.
    pub fn dispatch(&self, event: &Event) -> DispatchReport {
        self.registry.dispatch(event)
    }

    fn listen_function(&self, volatile: bool) -> mlua::Result<Function> {
        let registry = Rc::downgrade(&self.registry);
        self.lua
            .create_function(move |_, (event, entity, callback): (String, u64, Function)| {
                let live = registry
                    .upgrade()
                    .ok_or_else(|| mlua::Error::runtime("event registry is gone"))?;

                let spec = ListenerSpec::new(event, &EntityId::new(entity), LuaCallback::new(callback));
                let spec = if volatile { spec.volatile() } else { spec };

                Ok(ScriptHandle {
                    handle: live.register(spec),
                    registry: Weak::clone(&registry),
                })
            })
    }
}

impl Drop for ScriptEvents {
    fn drop(&mut self) {
        self.registry.clear();
    }
}

/// Handle userdata returned to scripts by `events.listen` and `events.once`.
struct ScriptHandle {
    handle: ListenerHandle,
    registry: Weak<Registry>,
}

impl UserData for ScriptHandle {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("id", |_, this| Ok(this.handle.id().get()));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        // h:clear() -> bool
        methods.add_method("clear", |_, this, ()| {
            Ok(this
                .registry
                .upgrade()
                .is_some_and(|registry| registry.remove(this.handle)))
        });
    }
}
