//! Mock callbacks, reporters and converters.
//!
//! All mocks are cheap to clone and share their state between clones, so a
//! test keeps one clone for assertions and hands another to the registry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use beacon_events::{
    BoxError, DispatchError, EntityId, ErrorReporter, Invocable, ListenerId, Value, ValueConverter,
};

/// Ordered log shared by several callbacks, for asserting delivery order.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    /// Entries in the order they were written.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Drop all entries.
    pub fn reset(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Callback that records every argument list it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingCallback {
    calls: Rc<RefCell<Vec<Vec<Value>>>>,
    journal: Option<(Journal, String)>,
}

impl RecordingCallback {
    /// Create a recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write `tag` to `journal` on every invocation.
    #[must_use]
    pub fn with_journal(mut self, journal: &Journal, tag: impl Into<String>) -> Self {
        self.journal = Some((journal.clone(), tag.into()));
        self
    }

    /// Every argument list received, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.borrow().clone()
    }

    /// Number of invocations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Returns `true` if invoked at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }
}

impl Invocable<Value> for RecordingCallback {
    fn invoke(&self, arguments: &[Value]) -> Result<(), BoxError> {
        self.calls.borrow_mut().push(arguments.to_vec());
        if let Some((journal, tag)) = &self.journal {
            journal.push(tag.clone());
        }
        Ok(())
    }
}

/// Callback that always returns an error.
#[derive(Debug, Clone)]
pub struct FailingCallback {
    message: String,
    calls: Rc<Cell<usize>>,
}

impl FailingCallback {
    /// Fail with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Rc::default(),
        }
    }

    /// Number of invocations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

impl<V> Invocable<V> for FailingCallback {
    fn invoke(&self, _arguments: &[V]) -> Result<(), BoxError> {
        self.calls.set(self.calls.get().saturating_add(1));
        Err(self.message.clone().into())
    }
}

/// Callback that always panics.
#[derive(Debug, Clone)]
pub struct PanickingCallback {
    message: String,
}

impl PanickingCallback {
    /// Panic with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<V> Invocable<V> for PanickingCallback {
    fn invoke(&self, _arguments: &[V]) -> Result<(), BoxError> {
        panic!("{}", self.message);
    }
}

/// A failure captured by [`CollectingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedFailure {
    /// Failing listener, `None` for conversion failures.
    pub listener: Option<ListenerId>,
    /// Event being dispatched.
    pub event: String,
    /// Entity of the event.
    pub entity: EntityId,
    /// Rendered error.
    pub message: String,
}

/// Reporter that keeps every failure for later assertions.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    failures: Rc<RefCell<Vec<ReportedFailure>>>,
}

impl CollectingReporter {
    /// Create an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured failures, oldest first.
    #[must_use]
    pub fn failures(&self) -> Vec<ReportedFailure> {
        self.failures.borrow().clone()
    }

    /// Rendered error messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.failures
            .borrow()
            .iter()
            .map(|f| f.message.clone())
            .collect()
    }

    /// Number of captured failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.borrow().len()
    }

    /// Returns `true` if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.borrow().is_empty()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: &DispatchError) {
        self.failures.borrow_mut().push(ReportedFailure {
            listener: error.listener(),
            event: error.event().to_string(),
            entity: error.entity(),
            message: error.to_string(),
        });
    }
}

/// Identity converter that counts conversions and can refuse a value type.
#[derive(Debug, Clone, Default)]
pub struct CountingConverter {
    conversions: Rc<Cell<usize>>,
    reject: Option<&'static str>,
}

impl CountingConverter {
    /// Count conversions, accept everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on values whose [`Value::type_name`] is `type_name`.
    #[must_use]
    pub fn rejecting(type_name: &'static str) -> Self {
        Self {
            reject: Some(type_name),
            ..Self::default()
        }
    }

    /// Number of `convert` calls so far.
    #[must_use]
    pub fn conversions(&self) -> usize {
        self.conversions.get()
    }
}

impl ValueConverter for CountingConverter {
    type Output = Value;

    fn convert(&self, value: &Value) -> Result<Value, BoxError> {
        self.conversions.set(self.conversions.get().saturating_add(1));
        if self.reject == Some(value.type_name()) {
            return Err(format!("cannot convert {} values", value.type_name()).into());
        }
        Ok(value.clone())
    }
}
