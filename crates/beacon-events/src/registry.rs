//! The event registry: listener storage, registration and dispatch.
//!
//! Dispatch is safe against mutation from inside callbacks. Before any
//! callback runs, the matching listeners are snapshotted in registration
//! order. Each snapshot entry is then re-checked against the live collection
//! right before it is invoked, so a listener removed by an earlier callback
//! is skipped and nothing is visited twice. The live collection is a `Vec`
//! kept sorted by id (ids only grow), which makes the liveness check a
//! binary search.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::entity::{Entity, EntityId};
use crate::error::{DispatchError, panic_message};
use crate::event::Event;
use crate::invoke::{Invocable, ValueConverter};
use crate::listener::{Listener, ListenerHandle, ListenerId, ListenerSpec};
use crate::reporter::{ErrorReporter, TracingReporter};

/// Counts from a single [`EventRegistry::dispatch`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners that matched when dispatch started.
    pub matched: usize,
    /// Callbacks actually invoked.
    pub invoked: usize,
    /// Invoked callbacks that failed or panicked.
    pub failed: usize,
}

impl DispatchReport {
    /// Returns `true` if every invoked callback succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Snapshot entry taken at the start of a dispatch.
struct Pending<V> {
    id: ListenerId,
    callback: Rc<dyn Invocable<V>>,
    volatile: bool,
}

/// Registry of entity-scoped event listeners.
///
/// All operations take `&self`, so callbacks invoked by
/// [`dispatch`](Self::dispatch) may register, remove, clear or dispatch
/// on the same registry. The registry is single-threaded and needs no
/// external locking.
pub struct EventRegistry<C: ValueConverter> {
    converter: C,
    reporter: Box<dyn ErrorReporter>,
    config: RegistryConfig,
    listeners: RefCell<Vec<Listener<C::Output>>>,
    last_id: Cell<u64>,
}

impl<C: ValueConverter> fmt::Debug for EventRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listener_count", &self.len())
            .field("last_id", &self.last_id.get())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: ValueConverter + Default> Default for EventRegistry<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: ValueConverter> EventRegistry<C> {
    /// Create an empty registry that reports failures through `tracing`.
    #[must_use]
    pub fn new(converter: C) -> Self {
        Self::with_config(converter, RegistryConfig::default())
    }

    /// Create an empty registry with explicit configuration.
    #[must_use]
    pub fn with_config(converter: C, config: RegistryConfig) -> Self {
        Self {
            converter,
            reporter: Box::new(TracingReporter),
            listeners: RefCell::new(Vec::with_capacity(config.initial_capacity)),
            last_id: Cell::new(0),
            config,
        }
    }

    /// Replace the error reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The value converter used for event arguments.
    #[must_use]
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Register a listener and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if the registry has issued `u64::MAX` ids.
    pub fn register(&self, spec: ListenerSpec<C::Output>) -> ListenerHandle {
        let id = self.next_id();

        debug!(
            listener_id = %id,
            event = %spec.event,
            entity = %spec.entity,
            volatile = spec.volatile,
            "Listener registered"
        );

        self.listeners
            .borrow_mut()
            .push(Listener::from_spec(id, spec));
        ListenerHandle::new(id)
    }

    /// Register a persistent listener.
    pub fn listen<F>(
        &self,
        event: impl Into<String>,
        entity: &impl Entity,
        callback: F,
    ) -> ListenerHandle
    where
        F: Invocable<C::Output> + 'static,
    {
        self.register(ListenerSpec::new(event, entity, callback))
    }

    /// Register a one-shot listener, removed on its first matching delivery.
    pub fn listen_once<F>(
        &self,
        event: impl Into<String>,
        entity: &impl Entity,
        callback: F,
    ) -> ListenerHandle
    where
        F: Invocable<C::Output> + 'static,
    {
        self.register(ListenerSpec::new(event, entity, callback).volatile())
    }

    /// Remove the listener behind `handle`.
    ///
    /// Returns `true` if it was registered. Removing an unknown or already
    /// removed listener does nothing.
    pub fn remove(&self, handle: ListenerHandle) -> bool {
        let removed = self.take(handle.id()).is_some();
        if removed {
            debug!(listener_id = %handle.id(), "Listener removed");
        }
        removed
    }

    /// Remove every listener. Ids keep counting from where they were.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.listeners.borrow_mut());
        debug!(removed = drained.len(), "All listeners cleared");
    }

    /// Returns `true` if the listener behind `handle` is still registered.
    #[must_use]
    pub fn contains(&self, handle: ListenerHandle) -> bool {
        self.position(handle.id()).is_some()
    }

    /// Number of live listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Number of live listeners registered for exactly `(event, entity)`.
    #[must_use]
    pub fn listener_count(&self, event: &str, entity: EntityId) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.matches(event, entity))
            .count()
    }

    /// Deliver `event` to every matching listener.
    ///
    /// Arguments are converted once and shared by all callbacks. When no
    /// listener matches, nothing is converted. Callback failures and panics
    /// are reported and never stop delivery to the remaining listeners.
    /// Listeners registered while this call runs are first eligible on the
    /// next dispatch.
    pub fn dispatch(&self, event: &Event) -> DispatchReport {
        let pending = self.snapshot(&event.name, event.entity);
        let mut report = DispatchReport {
            matched: pending.len(),
            ..DispatchReport::default()
        };

        if pending.is_empty() {
            trace!(event = %event.name, entity = %event.entity, "No listeners for event");
            return report;
        }

        let arguments = match self.convert_arguments(event) {
            Ok(arguments) => arguments,
            Err(error) => {
                self.reporter.report(&error);
                return report;
            },
        };

        trace!(
            event = %event.name,
            entity = %event.entity,
            matched = report.matched,
            "Dispatching event"
        );

        for entry in pending {
            if entry.volatile {
                // One-shot listeners leave the collection before they run.
                if self.take(entry.id).is_none() {
                    continue;
                }
            } else if self.position(entry.id).is_none() {
                continue;
            }

            report.invoked = report.invoked.saturating_add(1);
            if let Err(error) = self.invoke(&entry, event, &arguments) {
                report.failed = report.failed.saturating_add(1);
                self.reporter.report(&error);
            }
        }

        report
    }

    fn next_id(&self) -> ListenerId {
        let id = self
            .last_id
            .get()
            .checked_add(1)
            .expect("listener id space exhausted");
        self.last_id.set(id);
        ListenerId::new(id)
    }

    fn position(&self, id: ListenerId) -> Option<usize> {
        self.listeners
            .borrow()
            .binary_search_by_key(&id, |l| l.id)
            .ok()
    }

    /// Unlink a listener. The caller drops it after the borrow is released.
    fn take(&self, id: ListenerId) -> Option<Listener<C::Output>> {
        let mut listeners = self.listeners.borrow_mut();
        let index = listeners.binary_search_by_key(&id, |l| l.id).ok()?;
        Some(listeners.remove(index))
    }

    fn snapshot(&self, event: &str, entity: EntityId) -> Vec<Pending<C::Output>> {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.matches(event, entity))
            .map(|l| Pending {
                id: l.id,
                callback: Rc::clone(&l.callback),
                volatile: l.volatile,
            })
            .collect()
    }

    fn convert_arguments(&self, event: &Event) -> Result<Vec<C::Output>, DispatchError> {
        event
            .arguments
            .iter()
            .enumerate()
            .map(|(index, value)| {
                self.converter
                    .convert(value)
                    .map_err(|source| DispatchError::Conversion {
                        event: event.name.clone(),
                        entity: event.entity,
                        index,
                        source,
                    })
            })
            .collect()
    }

    fn invoke(
        &self,
        entry: &Pending<C::Output>,
        event: &Event,
        arguments: &[C::Output],
    ) -> Result<(), DispatchError> {
        let outcome = if self.config.catch_panics {
            match panic::catch_unwind(AssertUnwindSafe(|| entry.callback.invoke(arguments))) {
                Ok(outcome) => outcome,
                Err(payload) => {
                    return Err(DispatchError::Panicked {
                        listener: entry.id,
                        event: event.name.clone(),
                        entity: event.entity,
                        message: panic_message(&*payload),
                    });
                },
            }
        } else {
            entry.callback.invoke(arguments)
        };

        outcome.map_err(|source| DispatchError::Callback {
            listener: entry.id,
            event: event.name.clone(),
            entity: event.entity,
            source,
        })
    }
}
